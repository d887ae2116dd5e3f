use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use shared_lib::AppConfig;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use web_service::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // 默认输出info级别日志，可通过 RUST_LOG 调整
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 启动 Charity Fund...");

    let config = AppConfig::load()?;

    let pool = database::initialize_database(config.clone())
        .await
        .wrap_err("初始化数据库失败")?;

    let state = AppState::with_pool(pool, &config.auth)?;
    web_service::bootstrap_superuser(&state, &config.auth)
        .await
        .wrap_err("创建超级管理员失败")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => info!("📴 收到 Ctrl+C，准备关闭"),
            Err(e) => {
                // 发送端不能被丢弃，否则服务会立即退出
                error!("❌ 监听 Ctrl+C 失败: {e}");
                std::future::pending::<()>().await;
            }
        }
        let _ = shutdown_tx.send(true);
    });

    web_service::start_web_service(state, &config.bind_addr, shutdown_rx).await?;

    info!("👋 Charity Fund 已退出");
    Ok(())
}
