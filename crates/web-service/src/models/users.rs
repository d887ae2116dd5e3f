use chrono::NaiveDateTime;
use database::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 用户注册
///
/// 客户端可以提交 `is_active`/`is_superuser`/`is_verified`，但注册时一律忽略，
/// 新用户总是激活、未验证的普通用户
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserRegister {
    #[schema(example = "user@example.com")]
    #[validate(email, length(max = 320))]
    pub email: String,

    #[validate(length(min = 3))]
    pub password: String,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub birthday: Option<NaiveDateTime>,

    pub is_active: Option<bool>,

    pub is_superuser: Option<bool>,

    pub is_verified: Option<bool>,
}

/// 更新用户信息
///
/// `is_active`/`is_superuser`/`is_verified` 只有超级管理员通过 `/users/{id}` 修改时才生效
#[derive(Deserialize, Debug, ToSchema, Validate, Default)]
#[serde(deny_unknown_fields)]
pub struct UserUpdateRequest {
    #[validate(email, length(max = 320))]
    pub email: Option<String>,

    #[validate(length(min = 3))]
    pub password: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    pub birthday: Option<NaiveDateTime>,

    pub is_active: Option<bool>,

    pub is_superuser: Option<bool>,

    pub is_verified: Option<bool>,
}

/// 返回给前端的用户信息（不含密码）
#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq)]
pub struct UserInfo {
    pub id: i32,

    pub email: String,

    pub is_active: bool,

    pub is_superuser: bool,

    pub is_verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDateTime>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
            first_name: user.first_name,
            last_name: user.last_name,
            birthday: user.birthday,
        }
    }
}

/// 登录表单（OAuth2 password flow）
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    /// 用户邮箱
    pub username: String,
    pub password: String,
}

/// 登录成功返回的token
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[schema(example = "bearer")]
    pub token_type: String,
}
