//! 认证模块
//!
//! - [`password`]：Argon2 密码哈希
//! - [`token`]：JWT access token 的签发与校验
//! - [`extractor`]：axum 提取器，handler 通过参数声明需要的权限

pub mod extractor;
pub mod password;
pub mod token;

pub use extractor::{CurrentUser, Superuser};
pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{Claims, JwtAuth};
