//! 捐款相关接口

use crate::auth::{CurrentUser, Superuser};
use crate::models::donations::{DonationCreate, DonationInfo, UserDonationInfo};
use crate::models::err::AppError;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;
use validator::Validate;

/// 捐款
///
/// 捐款金额会立即按创建时间从早到晚投入到未筹满的项目中。
/// 返回值只包含捐款人可见的字段，不包含分配情况。
#[utoipa::path(post,
    path = "/donation",
    tag = "donations",
    request_body = DonationCreate,
    security(("bearer" = [])),
    responses(
        (status = 201, body = UserDonationInfo),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn create_donation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(donation): Json<DonationCreate>,
) -> Result<(StatusCode, Json<UserDonationInfo>), AppError> {
    debug!("💰 用户 {} 捐款 {:?}", user.id, donation);

    donation.validate()?;

    let donation = state
        .donations
        .create_donation(database::DonationCreate {
            user_id: user.id,
            full_amount: donation.full_amount,
            comment: donation.comment,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(donation.into())))
}

/// 查询所有捐款（超级管理员）
#[utoipa::path(get,
    path = "/donation",
    tag = "donations",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Vec<DonationInfo>),
        (status = 403, description = "Not a superuser"),
    )
)]
pub async fn list_donations(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
) -> Result<Json<Vec<DonationInfo>>, AppError> {
    let donations = state.donations.list_donations().await?;

    Ok(Json(donations.into_iter().map(Into::into).collect()))
}

/// 查询当前用户自己的捐款
#[utoipa::path(get,
    path = "/donation/my",
    tag = "donations",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Vec<UserDonationInfo>),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn my_donations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UserDonationInfo>>, AppError> {
    let donations = state.donations.list_user_donations(user.id).await?;

    Ok(Json(donations.into_iter().map(Into::into).collect()))
}
