//! 项目服务
//!
//! 提供项目相关的业务逻辑操作

use std::sync::Arc;

use database::{CharityProject, ProjectCreate, ProjectRepositoryTrait, ProjectUpdate};
use tracing::warn;

use crate::models::err::AppError;
use crate::models::reports::ClosedProjectReport;

/// 项目名称重复时返回的错误信息
const DUPLICATE_NAME: &str = "Project with this name already exists!";

#[derive(Clone)]
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub async fn list_projects(&self) -> Result<Vec<CharityProject>, AppError> {
        Ok(self.repository.list_projects().await?)
    }

    pub async fn get_project(&self, id: i32) -> Result<CharityProject, AppError> {
        Ok(self.repository.get_project_by_id(id).await?)
    }

    /// 创建项目，并把未分配完的捐款投入进去
    pub async fn create_project(&self, project: ProjectCreate) -> Result<CharityProject, AppError> {
        self.ensure_name_available(&project.name, None).await?;

        Ok(self.repository.create_project(project).await?)
    }

    pub async fn update_project(&self, id: i32, update: ProjectUpdate) -> Result<CharityProject, AppError> {
        if let Some(name) = update.name.as_deref() {
            self.ensure_name_available(name, Some(id)).await?;
        }

        Ok(self.repository.update_project(id, update).await?)
    }

    /// 删除项目，只允许删除还没有收到投资的项目
    pub async fn delete_project(&self, id: i32) -> Result<CharityProject, AppError> {
        Ok(self.repository.delete_project(id).await?)
    }

    /// 已关闭项目按筹款耗时升序排列
    pub async fn closed_projects_report(&self) -> Result<Vec<ClosedProjectReport>, AppError> {
        let projects = self.repository.list_closed_projects().await?;
        Ok(projects.into_iter().filter_map(ClosedProjectReport::from_project).collect())
    }

    async fn ensure_name_available(&self, name: &str, current: Option<i32>) -> Result<(), AppError> {
        match self.repository.find_project_by_name(name).await? {
            Some(existing) if Some(existing.id) != current => {
                warn!("⚠️ 项目名称重复: {name}");
                Err(AppError::bad_request(DUPLICATE_NAME))
            }
            _ => Ok(()),
        }
    }
}
