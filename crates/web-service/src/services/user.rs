//! 用户服务
//!
//! 注册、登录校验、资料修改和启动时的超级管理员初始化

use std::sync::Arc;

use database::{User, UserCreate, UserRepositoryTrait, UserUpdate};
use tracing::{debug, info, warn};

use crate::auth::PasswordHasher;
use crate::models::err::AppError;
use crate::models::users::{UserRegister, UserUpdateRequest};

const USER_ALREADY_EXISTS: &str = "REGISTER_USER_ALREADY_EXISTS";
const EMAIL_ALREADY_EXISTS: &str = "UPDATE_USER_EMAIL_ALREADY_EXISTS";
const BAD_CREDENTIALS: &str = "LOGIN_BAD_CREDENTIALS";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// 注册普通用户：激活、非超级管理员、未验证
    /// 注册新用户，请求中的权限字段不生效
    pub async fn register(&self, register: UserRegister) -> Result<User, AppError> {
        if self.repository.find_user_by_email(&register.email).await?.is_some() {
            warn!("⚠️ 邮箱已注册: {}", register.email);
            return Err(AppError::bad_request(USER_ALREADY_EXISTS));
        }

        let user = self
            .repository
            .create_user(UserCreate {
                hashed_password: self.hasher.hash(&register.password)?,
                email: register.email,
                is_active: true,
                is_superuser: false,
                is_verified: false,
                first_name: register.first_name,
                last_name: register.last_name,
                birthday: register.birthday,
            })
            .await?;

        info!("👤 新用户注册: {}", user.id);
        Ok(user)
    }

    /// 校验登录信息，邮箱不存在、密码错误、用户未激活都返回同一个错误
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.repository.find_user_by_email(email).await?;

        match user {
            Some(user) if user.is_active && self.hasher.verify(password, &user.hashed_password) => Ok(user),
            _ => {
                debug!("🚫 登录失败: {email}");
                Err(AppError::bad_request(BAD_CREDENTIALS))
            }
        }
    }

    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        Ok(self.repository.get_user_by_id(id).await?)
    }

    /// 更新用户信息
    ///
    /// `allow_flags` 为 `false` 时（用户修改自己的资料）忽略 `is_active`/`is_superuser`/`is_verified`
    pub async fn update_user(&self, id: i32, request: UserUpdateRequest, allow_flags: bool) -> Result<User, AppError> {
        if let Some(email) = request.email.as_deref() {
            if let Some(existing) = self.repository.find_user_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::bad_request(EMAIL_ALREADY_EXISTS));
                }
            }
        }

        let hashed_password = request.password.as_deref().map(|p| self.hasher.hash(p)).transpose()?;

        let mut update = UserUpdate {
            email: request.email,
            hashed_password,
            first_name: request.first_name,
            last_name: request.last_name,
            birthday: request.birthday,
            ..Default::default()
        };
        if allow_flags {
            update.is_active = request.is_active;
            update.is_superuser = request.is_superuser;
            update.is_verified = request.is_verified;
        }

        Ok(self.repository.update_user(id, update).await?)
    }

    /// 确保超级管理员存在，已存在时返回 `None`
    pub async fn ensure_superuser(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        if self.repository.find_user_by_email(email).await?.is_some() {
            debug!("超级管理员 {email} 已存在");
            return Ok(None);
        }

        let user = self
            .repository
            .create_user(UserCreate {
                email: email.to_string(),
                hashed_password: self.hasher.hash(password)?,
                is_active: true,
                is_superuser: true,
                is_verified: true,
                first_name: None,
                last_name: None,
                birthday: None,
            })
            .await?;

        info!("👑 已创建超级管理员 {}", user.email);
        Ok(Some(user))
    }
}
