//! 用户仓库
//!
//! 注意：`user` 是 PostgreSQL 的保留字，SQL中必须加双引号

use crate::models::user::{User, UserCreate, UserUpdate};
use crate::repositories::traits::UserRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::debug;

const USER_COLUMNS: &str =
    "id, email, hashed_password, is_active, is_superuser, is_verified, first_name, last_name, birthday";

/// 用户仓库结构体
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<User> {
        debug!("📝 创建用户: {}", user.email);

        let sql = format!(
            r#"
            INSERT INTO "user" (email, hashed_password, is_active, is_superuser, is_verified, first_name, last_name, birthday)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS};
            "#
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(user.is_active)
            .bind(user.is_superuser)
            .bind(user.is_verified)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.birthday)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::unique_violation_as(e, format!("User {} already exists", user.email)))?;

        debug!("✅ 用户创建成功: {:?}", created);
        Ok(created)
    }

    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<User> {
        debug!("🔍 根据 ID 获取用户: {}", id);

        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE id = $1"#);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("User {id}")))
    }

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!("🔍 根据邮箱查找用户: {}", email);

        let sql = format!(r#"SELECT {USER_COLUMNS} FROM "user" WHERE email = $1"#);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<User> {
        debug!("🔄 更新用户 {}", id);

        let sql = format!(
            r#"
            UPDATE "user"
            SET email = coalesce($2, email),
                hashed_password = coalesce($3, hashed_password),
                is_active = coalesce($4, is_active),
                is_superuser = coalesce($5, is_superuser),
                is_verified = coalesce($6, is_verified),
                first_name = coalesce($7, first_name),
                last_name = coalesce($8, last_name),
                birthday = coalesce($9, birthday)
            WHERE id = $1
            RETURNING {USER_COLUMNS};
            "#
        );
        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&update.email)
            .bind(&update.hashed_password)
            .bind(update.is_active)
            .bind(update.is_superuser)
            .bind(update.is_verified)
            .bind(&update.first_name)
            .bind(&update.last_name)
            .bind(update.birthday)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::unique_violation_as(e, "Email already in use"))?
            .ok_or_else(|| DatabaseError::not_found(format!("User {id}")))?;

        debug!("✅ 用户更新成功: {:?}", updated);
        Ok(updated)
    }
}
