//! 报表接口

use crate::auth::Superuser;
use crate::models::err::AppError;
use crate::models::reports::ClosedProjectReport;
use crate::AppState;
use axum::extract::State;
use axum::Json;

/// 已关闭项目报表
///
/// 按筹款耗时（`close_date - created_date`）升序，筹得最快的项目排在最前面。
#[utoipa::path(get,
    path = "/reports/closed-projects",
    tag = "reports",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Vec<ClosedProjectReport>),
        (status = 403, description = "Not a superuser"),
    )
)]
pub async fn closed_projects(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
) -> Result<Json<Vec<ClosedProjectReport>>, AppError> {
    Ok(Json(state.projects.closed_projects_report().await?))
}
