use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use database::User;
use tracing::debug;

use crate::models::err::AppError;
use crate::AppState;

/// 从请求中提取当前登录的用户
///
/// 要求 `Authorization: Bearer <token>` 头部有效，且用户处于激活状态，否则返回401。
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let claims = state.auth.verify(bearer.token())?;
        let user = state
            .users
            .get_user(claims.user_id()?)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::Unauthorized,
                other => other,
            })?;

        if !user.is_active {
            debug!("🚫 用户 {} 未激活", user.id);
            return Err(AppError::Unauthorized);
        }

        Ok(CurrentUser(user))
    }
}

/// 从请求中提取超级管理员
///
/// 未登录返回401，已登录但不是超级管理员返回403。
#[derive(Debug, Clone)]
pub struct Superuser(pub User);

impl Deref for Superuser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Superuser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            debug!("🚫 用户 {} 不是超级管理员", user.id);
            return Err(AppError::Forbidden);
        }
        Ok(Superuser(user))
    }
}
