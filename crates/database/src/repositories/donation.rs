//! 捐款仓库
//!
//! 负责捐款相关的数据库操作

use crate::models::donation::{Donation, DonationCreate};
use crate::models::project::CharityProject;
use crate::repositories::funds::{self, DONATION_COLUMNS};
use crate::repositories::traits::DonationRepositoryTrait;
use crate::DatabaseResult;
use chrono::Utc;
use shared_lib::invest;
use sqlx::PgPool;
use tracing::{debug, info};

/// 捐款仓库结构体
#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl DonationRepositoryTrait for DonationRepository {
    /// 创建捐款并投入到未筹满的项目中
    ///
    /// 和 [`ProjectRepository::create_project`](crate::ProjectRepository) 对称，
    /// 只是分配方向相反
    async fn create_donation(&self, donation: DonationCreate) -> DatabaseResult<Donation> {
        debug!("📝 用户 {} 创建捐款: {}", donation.user_id, donation.full_amount);

        let now = Utc::now().naive_utc();
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r#"
            INSERT INTO donation (user_id, comment, full_amount, invested_amount, fully_invested, created_date)
            VALUES ($1, $2, $3, 0, false, $4)
            RETURNING {DONATION_COLUMNS};
            "#
        );
        let mut created = sqlx::query_as::<_, Donation>(&sql)
            .bind(donation.user_id)
            .bind(&donation.comment)
            .bind(donation.full_amount)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        let mut projects: Vec<CharityProject> = funds::lock_open_rows(&mut tx).await?;
        let touched = invest(&mut created, &mut projects, now);

        if touched > 0 {
            funds::save_investments(&mut tx, std::slice::from_ref(&created)).await?;
            funds::save_investments(&mut tx, &projects[..touched]).await?;
        }

        tx.commit().await?;

        for project in projects[..touched].iter().filter(|p| p.fully_invested) {
            info!("🎉 项目 {} 已筹满", project.id);
        }
        debug!("✅ 捐款创建成功，投入了 {} 个项目: {:#?}", touched, created);
        Ok(created)
    }

    async fn list_donations(&self) -> DatabaseResult<Vec<Donation>> {
        debug!("🔍 查询所有捐款");

        let sql = format!("SELECT {DONATION_COLUMNS} FROM donation ORDER BY id");
        Ok(sqlx::query_as::<_, Donation>(&sql).fetch_all(&self.pool).await?)
    }

    async fn list_user_donations(&self, user_id: i32) -> DatabaseResult<Vec<Donation>> {
        debug!("🔍 查询用户 {} 的捐款", user_id);

        let sql = format!("SELECT {DONATION_COLUMNS} FROM donation WHERE user_id = $1 ORDER BY id");
        Ok(sqlx::query_as::<_, Donation>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?)
    }
}
