//! 用户信息接口

use crate::auth::{CurrentUser, Superuser};
use crate::models::err::AppError;
use crate::models::users::{UserInfo, UserUpdateRequest};
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 查询当前登录用户
#[utoipa::path(get,
    path = "/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses((status = 200, body = UserInfo), (status = 401, description = "Not logged in"))
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    Json(user.into())
}

/// 修改当前登录用户的资料
///
/// `is_active`/`is_superuser`/`is_verified` 在这里会被忽略。
#[utoipa::path(patch,
    path = "/users/me",
    tag = "users",
    request_body = UserUpdateRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, body = UserInfo),
        (status = 400, description = "Email already used"),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UserUpdateRequest>,
) -> Result<Json<UserInfo>, AppError> {
    debug!("Updating user {} with {:?}", user.id, request.email);

    request.validate()?;

    let user = state.users.update_user(user.id, request, false).await?;

    Ok(Json(user.into()))
}

/// 查询指定用户（超级管理员）
#[utoipa::path(get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    security(("bearer" = [])),
    responses((status = 200, body = UserInfo), (status = 404, description = "User not found"))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
    Path(user_id): Path<i32>,
) -> Result<Json<UserInfo>, AppError> {
    let user = state.users.get_user(user_id).await?;

    Ok(Json(user.into()))
}

/// 修改指定用户（超级管理员），可以修改权限字段
#[utoipa::path(patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserUpdateRequest,
    security(("bearer" = [])),
    responses((status = 200, body = UserInfo), (status = 404, description = "User not found"))
)]
pub async fn update_user(
    State(state): State<AppState>,
    Superuser(admin): Superuser,
    Path(user_id): Path<i32>,
    Json(request): Json<UserUpdateRequest>,
) -> Result<Json<UserInfo>, AppError> {
    debug!("管理员 {} 修改用户 {}", admin.id, user_id);

    request.validate()?;

    let user = state.users.update_user(user_id, request, true).await?;

    Ok(Json(user.into()))
}
