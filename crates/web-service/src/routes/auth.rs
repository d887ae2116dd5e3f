//! 注册和登录接口

use crate::models::err::AppError;
use crate::models::users::{LoginForm, TokenResponse, UserInfo, UserRegister};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use tracing::debug;
use validator::Validate;

/// 注册新用户
///
/// 新用户默认激活、非超级管理员。邮箱已存在时返回400。
#[utoipa::path(post,
    path = "/auth/register",
    tag = "auth",
    request_body = UserRegister,
    responses(
        (status = 201, body = UserInfo),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(register): Json<UserRegister>,
) -> Result<(StatusCode, Json<UserInfo>), AppError> {
    debug!("📝 注册用户 {}", register.email);

    register.validate()?;

    let user = state.users.register(register).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// 登录，获取 access token
///
/// 使用 OAuth2 password 表单：`username` 为邮箱。
#[utoipa::path(post,
    path = "/auth/jwt/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, body = TokenResponse),
        (status = 400, description = "Bad credentials or inactive user"),
    )
)]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Json<TokenResponse>, AppError> {
    debug!("🔑 用户登录 {}", form.username);

    let user = state.users.authenticate(&form.username, &form.password).await?;
    let access_token = state.auth.issue(user.id)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
