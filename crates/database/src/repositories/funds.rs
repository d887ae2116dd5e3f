//! 项目/捐款共用的资金操作
//!
//! - 项目更新、删除的业务约束（PostgreSQL 和内存实现共用）
//! - 事务内锁定未完成记录、回写分配结果的SQL

use crate::models::{CharityProject, Donation, ProjectUpdate};
use crate::{DatabaseError, DatabaseResult};
use chrono::NaiveDateTime;
use shared_lib::Investable;
use sqlx::postgres::PgRow;
use sqlx::PgConnection;

pub(crate) const PROJECT_COLUMNS: &str =
    "id, name, description, full_amount, invested_amount, fully_invested, created_date, close_date";

pub(crate) const DONATION_COLUMNS: &str =
    "id, user_id, comment, full_amount, invested_amount, fully_invested, created_date, close_date";

/// 能够参与分配并回写到数据库的表记录
pub(crate) trait FundsRow: Investable + for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    fn id(&self) -> i32;

    fn close_date(&self) -> Option<NaiveDateTime>;
}

impl FundsRow for CharityProject {
    const TABLE: &'static str = "charity_project";
    const COLUMNS: &'static str = PROJECT_COLUMNS;

    fn id(&self) -> i32 {
        self.id
    }

    fn close_date(&self) -> Option<NaiveDateTime> {
        self.close_date
    }
}

impl FundsRow for Donation {
    const TABLE: &'static str = "donation";
    const COLUMNS: &'static str = DONATION_COLUMNS;

    fn id(&self) -> i32 {
        self.id
    }

    fn close_date(&self) -> Option<NaiveDateTime> {
        self.close_date
    }
}

/// 在事务中读取并锁定所有未完成的记录，按创建时间升序
///
/// `FOR UPDATE` 保证并发分配不会重复使用同一笔资金
pub(crate) async fn lock_open_rows<T: FundsRow>(conn: &mut PgConnection) -> DatabaseResult<Vec<T>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE NOT fully_invested ORDER BY created_date, id FOR UPDATE",
        T::COLUMNS,
        T::TABLE
    );

    Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&mut *conn).await?)
}

/// 回写分配结果
pub(crate) async fn save_investments<T: FundsRow>(conn: &mut PgConnection, rows: &[T]) -> DatabaseResult<()> {
    let sql = format!(
        "UPDATE {} SET invested_amount = $2, fully_invested = $3, close_date = $4 WHERE id = $1",
        T::TABLE
    );

    for row in rows {
        sqlx::query(&sql)
            .bind(row.id())
            .bind(row.invested_amount())
            .bind(row.is_fully_invested())
            .bind(row.close_date())
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// 检查项目是否允许按 `update` 修改
///
/// # 返回值
/// 修改后项目是否应该被关闭（目标金额正好等于已筹集金额）
pub(crate) fn check_project_update(project: &CharityProject, update: &ProjectUpdate) -> DatabaseResult<bool> {
    if project.fully_invested {
        return Err(DatabaseError::validation("A closed project can not be modified"));
    }

    let full_amount = update.full_amount.unwrap_or(project.full_amount);
    if full_amount < project.invested_amount {
        return Err(DatabaseError::validation(format!(
            "full_amount can not be less than the already invested amount ({})",
            project.invested_amount
        )));
    }

    Ok(full_amount == project.invested_amount)
}

/// 检查项目是否允许删除
pub(crate) fn check_project_delete(project: &CharityProject) -> DatabaseResult<()> {
    if project.invested_amount > 0 {
        return Err(DatabaseError::validation("A project with invested funds can not be deleted"));
    }
    Ok(())
}
