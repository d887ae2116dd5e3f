//! 慈善项目相关接口
//!

use crate::auth::Superuser;
use crate::models::err::AppError;
use crate::models::projects::{ProjectCreate, ProjectInfo, ProjectUpdate};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};
use validator::Validate;

/// 查询所有项目
///
/// 不需要登录，按ID升序返回。
#[utoipa::path(get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All charity projects", body = Vec<ProjectInfo>)
    ),
)]
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<ProjectInfo>>, AppError> {
    debug!("📋 查询所有项目");

    let projects = state.projects.list_projects().await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// 创建项目
///
/// 仅超级管理员可用。项目创建后，会按创建时间从早到晚把还没有分配完的捐款投入到新项目中，
/// 返回的是分配完成后的项目信息。
///
/// ## Json化
///
/// 请求体通过 `Json(project): Json<ProjectCreate>` 反序列化，
/// 传入未知字段或服务端维护的字段（例如 `invested_amount`）时 axum 会直接返回422；
/// 字段长度、金额范围等规则再由 [`Validate`] 校验，失败同样返回422。
#[utoipa::path(post,
    path = "/projects",
    tag = "projects",
    request_body = ProjectCreate,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created project after allocation", body = ProjectInfo),
        (status = 400, description = "Duplicate project name"),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Not a superuser"),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Superuser(user): Superuser,
    Json(project): Json<ProjectCreate>,
) -> Result<(StatusCode, Json<ProjectInfo>), AppError> {
    debug!("Creating project {:#?}", project);

    project.validate()?;

    let project = state.projects.create_project(project.into()).await?;
    info!("📁 用户 {} 创建了项目 {}", user.id, project.id);

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// 查询指定项目信息
#[utoipa::path(get,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, body = ProjectInfo),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Getting project id {:#?}", project_id);

    let project = state.projects.get_project(project_id).await?;

    Ok(Json(project.into()))
}

/// 更新项目信息
///
/// 根据 `id` 和修改信息 [`ProjectUpdate`] 更新项目。
///
/// - 已关闭的项目不能修改
/// - `full_amount` 不能小于已筹集金额，等于已筹集金额时项目关闭
#[utoipa::path(patch,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    request_body = ProjectUpdate,
    security(("bearer" = [])),
    responses(
        (status = 200, body = ProjectInfo),
        (status = 400, description = "Project closed, duplicate name or amount below invested"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Invalid payload"),
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
    Path(project_id): Path<i32>,
    Json(info): Json<ProjectUpdate>,
) -> Result<Json<ProjectInfo>, AppError> {
    debug!("Updating project {} with {:#?}", project_id, info);

    info.validate()?;

    let project = state.projects.update_project(project_id, info.into()).await?;

    Ok(Json(project.into()))
}

/// 删除指定的项目
///
/// 已经收到投资的项目不能删除。
#[utoipa::path(delete,
    path = "/projects/{id}",
    tag = "projects",
    params(("id" = i32, Path, description = "Project id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 400, description = "Project already has investments"),
        (status = 404, description = "Project not found"),
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Superuser(user): Superuser,
    Path(project_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    debug!("delete project {:#?}", project_id);

    let project = state.projects.delete_project(project_id).await?;
    info!("🗑️ 用户 {} 删除了项目 {} ({})", user.id, project.id, project.name);

    Ok(StatusCode::NO_CONTENT)
}
