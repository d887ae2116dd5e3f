//! 密码哈希
//!
//! 使用 Argon2id 算法，哈希结果为 PHC 字符串格式（自带算法参数和盐），可直接存入数据库。

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use color_eyre::eyre::eyre;

use crate::models::err::AppError;

/// 密码哈希trait
pub trait PasswordHasher: Send + Sync + 'static {
    /// 计算密码哈希
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// 校验密码，哈希格式不正确时同样返回`false`
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id 密码哈希
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// 使用自定义参数，测试中可以用较小的内存开销加快速度
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalError(eyre!("Password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| self.argon2().verify_password(password.as_bytes(), &parsed).is_ok())
            .unwrap_or(false)
    }
}
