//! 慈善项目仓库 trait 定义
//!
//! 定义慈善项目数据库操作的抽象接口

use crate::models::project::{CharityProject, ProjectCreate, ProjectUpdate};
use crate::DatabaseResult;

/// 慈善项目仓库trait定义
///
/// 定义了项目相关的数据库操作接口，支持：
/// - 项目列表
/// - 项目创建（同时分配未使用的捐款）
/// - 项目查询
/// - 项目更新
/// - 项目删除
/// - 已完成项目查询（按筹款速度排序）
#[async_trait::async_trait]
pub trait ProjectRepositoryTrait: Send + Sync + 'static {
    /// 查询所有项目，按ID升序
    async fn list_projects(&self) -> DatabaseResult<Vec<CharityProject>>;

    /// 创建新项目
    ///
    /// 插入项目后，按创建时间从早到晚把未分配完的捐款投入到新项目中。
    ///
    /// # 返回值
    /// 返回分配完成后的项目信息
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<CharityProject>;

    /// 根据 ID 获取项目信息
    ///
    /// 项目不存在时返回 [`DatabaseError::NotFound`](crate::DatabaseError::NotFound)
    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<CharityProject>;

    /// 根据名称精确查找项目
    async fn find_project_by_name(&self, name: &str) -> DatabaseResult<Option<CharityProject>>;

    /// 更新项目信息
    ///
    /// # 约束
    /// - 已关闭的项目不允许修改
    /// - `full_amount` 不能小于已筹集金额
    /// - `full_amount` 等于已筹集金额时项目会被关闭
    ///
    /// 违反约束时返回 [`DatabaseError::ValidationError`](crate::DatabaseError::ValidationError)，
    /// 数据保持不变
    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<CharityProject>;

    /// 删除项目
    ///
    /// 只允许删除还没有任何投资的项目
    ///
    /// # 返回值
    /// 返回被删除的项目信息
    async fn delete_project(&self, id: i32) -> DatabaseResult<CharityProject>;

    /// 查询所有已关闭的项目，按筹款耗时（`close_date - created_date`）升序
    async fn list_closed_projects(&self) -> DatabaseResult<Vec<CharityProject>>;
}
