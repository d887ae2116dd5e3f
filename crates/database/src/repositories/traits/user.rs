//! 用户仓库 trait 定义

use crate::models::user::{User, UserCreate, UserUpdate};
use crate::DatabaseResult;

/// 用户仓库trait定义
#[async_trait::async_trait]
pub trait UserRepositoryTrait: Send + Sync + 'static {
    /// 创建用户
    ///
    /// 邮箱重复时返回 [`DatabaseError::ValidationError`](crate::DatabaseError::ValidationError)
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<User>;

    /// 根据 ID 获取用户
    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<User>;

    /// 根据邮箱查找用户
    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// 更新用户信息，`None` 字段保持原值
    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<User>;
}
