use color_eyre::eyre::eyre;
use color_eyre::{Result, Section};
use std::str::FromStr;
use std::sync::Arc;

/// 默认监听地址
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 默认token有效期（秒）
const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;

/// token有效期上限：一年
const MAX_TOKEN_LIFETIME_SECONDS: i64 = 365 * 24 * 3600;

/// 连接池默认最小/最大连接数
const DEFAULT_MIN_CONNECTIONS: u32 = 5;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// 认证配置
pub struct AuthConfig {
    /// JWT签名密钥
    ///
    /// 可通过环境变量 `AUTH_SECRET` 来设置（必填）
    pub secret: String,

    /// access token有效期（秒），范围 `1..=MAX_TOKEN_LIFETIME_SECONDS`
    ///
    /// 可通过环境变量 `TOKEN_LIFETIME_SECONDS` 来调整
    pub token_lifetime_seconds: i64,

    /// 启动时自动创建的超级管理员邮箱
    pub superuser_email: Option<String>,

    /// 启动时自动创建的超级管理员密码
    pub superuser_password: Option<String>,
}

/// 数据库连接池配置
pub struct PoolConfig {
    /// 环境变量 `DATABASE_MIN_CONNECTIONS`
    pub min_connections: u32,

    /// 环境变量 `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
}

/// 程序配置
pub struct AppConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// 连接池大小
    pub pool: PoolConfig,

    /// Web服务监听地址
    pub bind_addr: String,

    /// 认证配置
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 根据`lookup`函数读取配置项
    ///
    /// 拆出来是为了在测试中不依赖真实的环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let db_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("Can not load DATABASE_URL in environment"))
            .suggestion("设置 DATABASE_URL 环境变量")?;

        let secret = lookup("AUTH_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| eyre!("Can not load AUTH_SECRET in environment"))
            .suggestion("设置 AUTH_SECRET 环境变量，用于签发JWT")?;

        let token_lifetime_seconds: i64 =
            parse_or_default(&lookup, "TOKEN_LIFETIME_SECONDS", DEFAULT_TOKEN_LIFETIME_SECONDS)?;
        if !(1..=MAX_TOKEN_LIFETIME_SECONDS).contains(&token_lifetime_seconds) {
            return Err(eyre!("TOKEN_LIFETIME_SECONDS out of range: {token_lifetime_seconds}"))
                .suggestion(format!("取值范围为 1 到 {MAX_TOKEN_LIFETIME_SECONDS} 秒"));
        }

        let min_connections = parse_or_default(&lookup, "DATABASE_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS)?;
        let max_connections = parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 || min_connections > max_connections {
            return Err(eyre!(
                "Invalid pool size: min {min_connections}, max {max_connections}"
            ))
            .suggestion("DATABASE_MAX_CONNECTIONS 至少为1，且不能小于 DATABASE_MIN_CONNECTIONS");
        }

        Ok(AppConfig {
            postgresql_conn_str: db_url,
            pool: PoolConfig {
                min_connections,
                max_connections,
            },
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            auth: AuthConfig {
                secret,
                token_lifetime_seconds,
                superuser_email: lookup("SUPERUSER_EMAIL").filter(|s| !s.is_empty()),
                superuser_password: lookup("SUPERUSER_PASSWORD").filter(|s| !s.is_empty()),
            },
        })
    }
}

/// 读取可选的数字配置，未设置时使用默认值，格式错误时报错
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| eyre!("Can not parse {key}={raw}"))
            .suggestion(format!("{key} 必须是整数")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn with_required(extra: &[(&str, &str)]) -> Result<AppConfig> {
        let mut pairs = vec![("DATABASE_URL", "postgres://localhost/charity"), ("AUTH_SECRET", "secret")];
        pairs.extend_from_slice(extra);
        AppConfig::from_lookup(lookup_from(&pairs))
    }

    #[test]
    fn defaults_are_applied() {
        let config = with_required(&[]).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.auth.token_lifetime_seconds, 3600);
        assert_eq!(config.pool.min_connections, 5);
        assert_eq!(config.pool.max_connections, 20);
        assert!(config.auth.superuser_email.is_none());
        assert!(config.auth.superuser_password.is_none());
    }

    #[test]
    fn optional_values_are_read() {
        let config = with_required(&[
            ("TOKEN_LIFETIME_SECONDS", "600"),
            ("DATABASE_MIN_CONNECTIONS", "1"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("SUPERUSER_EMAIL", "root@example.com"),
            ("SUPERUSER_PASSWORD", "root"),
        ])
        .unwrap();

        assert_eq!(config.auth.token_lifetime_seconds, 600);
        assert_eq!(config.pool.max_connections, 4);
        assert_eq!(config.auth.superuser_email.as_deref(), Some("root@example.com"));
    }

    #[rstest]
    #[case("soon")]
    #[case("0")]
    #[case("-60")]
    #[case("31536001")]
    #[case("9223372036854775807")]
    fn invalid_lifetime_is_rejected(#[case] lifetime: &str) {
        assert!(with_required(&[("TOKEN_LIFETIME_SECONDS", lifetime)]).is_err());
    }

    #[rstest]
    #[case("0", "0")]
    #[case("10", "5")]
    #[case("-1", "5")]
    fn invalid_pool_size_is_rejected(#[case] min: &str, #[case] max: &str) {
        assert!(with_required(&[("DATABASE_MIN_CONNECTIONS", min), ("DATABASE_MAX_CONNECTIONS", max)]).is_err());
    }

    #[test]
    fn missing_required_variables_fail() {
        assert!(AppConfig::from_lookup(lookup_from(&[("AUTH_SECRET", "secret")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/charity"),
            ("AUTH_SECRET", ""),
        ]))
        .is_err());
    }
}
