//! 慈善项目仓库
//!
//! 负责慈善项目相关的数据库操作

use crate::models::donation::Donation;
use crate::models::project::{CharityProject, ProjectCreate, ProjectUpdate};
use crate::repositories::funds::{self, PROJECT_COLUMNS};
use crate::repositories::traits::ProjectRepositoryTrait;
use crate::{DatabaseError, DatabaseResult};
use chrono::Utc;
use shared_lib::invest;
use sqlx::PgPool;
use tracing::{debug, info};

/// 项目仓库结构体
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// 创建新的项目仓库实例
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    async fn list_projects(&self) -> DatabaseResult<Vec<CharityProject>> {
        debug!("🔍 查询所有项目");

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM charity_project ORDER BY id");
        let projects = sqlx::query_as::<_, CharityProject>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!("✅ 查询完成 - 共 {} 个项目", projects.len());
        Ok(projects)
    }

    /// 创建新项目
    ///
    /// 整个过程在一个事务中完成：
    /// 1. 插入项目（已筹集金额为0）
    /// 2. 锁定所有未分配完的捐款（按创建时间升序）
    /// 3. 调用 [`invest`] 计算分配结果
    /// 4. 回写项目和被修改的捐款
    ///
    /// 任何一步失败，事务在 drop 时自动回滚
    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<CharityProject> {
        debug!("📝 创建项目: {:#?}", project);

        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO charity_project (name, description, full_amount, invested_amount, fully_invested, created_date)
            VALUES ($1, $2, $3, 0, false, $4)
            RETURNING {PROJECT_COLUMNS};
            "#
        );
        let mut created = sqlx::query_as::<_, CharityProject>(&sql)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.full_amount)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::unique_violation_as(e, format!("Project name {} already exists", project.name)))?;

        let mut donations: Vec<Donation> = funds::lock_open_rows(&mut tx).await?;
        let touched = invest(&mut created, &mut donations, now);

        if touched > 0 {
            funds::save_investments(&mut tx, std::slice::from_ref(&created)).await?;
            funds::save_investments(&mut tx, &donations[..touched]).await?;
        }

        tx.commit().await?;

        if created.fully_invested {
            info!("🎉 项目 {} 创建时即已筹满", created.id);
        }
        debug!("✅ 项目创建成功，使用了 {} 笔捐款: {:#?}", touched, created);
        Ok(created)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<CharityProject> {
        debug!("🔍 根据 ID 获取项目: {}", id);

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM charity_project WHERE id = $1");
        sqlx::query_as::<_, CharityProject>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("Charity project {id}")))
    }

    async fn find_project_by_name(&self, name: &str) -> DatabaseResult<Option<CharityProject>> {
        debug!("🔍 根据名称查找项目: {}", name);

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM charity_project WHERE name = $1");
        Ok(sqlx::query_as::<_, CharityProject>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// 更新项目信息
    ///
    /// ## SQL
    ///
    /// 更新数据中的字段都是[`Option`]，因此使用了`postgresql`中的`coalesce`函数，
    /// 用户没有传入的字段会保持原值。
    ///
    /// 先用 `FOR UPDATE` 锁定项目再检查约束，避免和并发的捐款分配交错。
    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<CharityProject> {
        debug!("🔄 更新项目 {} 信息: {:#?}", id, update);

        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM charity_project WHERE id = $1 FOR UPDATE");
        let project = sqlx::query_as::<_, CharityProject>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("Charity project {id}")))?;

        let closing = funds::check_project_update(&project, &update)?;
        let close_date = closing.then(|| Utc::now().naive_utc());

        let sql = format!(
            r#"
            UPDATE charity_project
            SET name = coalesce($2, name),
                description = coalesce($3, description),
                full_amount = coalesce($4, full_amount),
                fully_invested = $5,
                close_date = $6
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS};
            "#
        );
        let updated = sqlx::query_as::<_, CharityProject>(&sql)
            .bind(id)
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.full_amount)
            .bind(closing)
            .bind(close_date)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DatabaseError::unique_violation_as(e, "Project name already exists"))?;

        tx.commit().await?;

        if closing {
            info!("🎉 项目 {} 调整目标金额后已筹满", id);
        }
        debug!("✅ 项目更新成功: {:#?}", updated);
        Ok(updated)
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<CharityProject> {
        debug!("🗑️ 删除项目: {}", id);

        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {PROJECT_COLUMNS} FROM charity_project WHERE id = $1 FOR UPDATE");
        let project = sqlx::query_as::<_, CharityProject>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found(format!("Charity project {id}")))?;

        funds::check_project_delete(&project)?;

        sqlx::query("DELETE FROM charity_project WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("✅ 项目删除成功: {:#?}", project);
        Ok(project)
    }

    async fn list_closed_projects(&self) -> DatabaseResult<Vec<CharityProject>> {
        debug!("🔍 查询已关闭项目");

        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM charity_project
            WHERE fully_invested
            ORDER BY close_date - created_date, id;
            "#
        );
        Ok(sqlx::query_as::<_, CharityProject>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }
}
