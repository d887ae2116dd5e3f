//! 捐款数据库模型

use chrono::NaiveDateTime;
use shared_lib::Investable;

/// 捐款，对应 `donation` 表
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Donation {
    pub id: i32,
    /// 捐款人
    pub user_id: i32,
    pub comment: Option<String>,
    /// 捐款金额
    pub full_amount: i64,
    /// 已经投入到项目中的金额
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub created_date: NaiveDateTime,
    pub close_date: Option<NaiveDateTime>,
}

impl Investable for Donation {
    fn full_amount(&self) -> i64 {
        self.full_amount
    }

    fn invested_amount(&self) -> i64 {
        self.invested_amount
    }

    fn set_invested_amount(&mut self, amount: i64) {
        self.invested_amount = amount;
    }

    fn close(&mut self, close_date: NaiveDateTime) {
        self.fully_invested = true;
        self.close_date = Some(close_date);
    }

    fn is_fully_invested(&self) -> bool {
        self.fully_invested
    }
}

/// 捐款创建参数
#[derive(Debug, Clone)]
pub struct DonationCreate {
    pub user_id: i32,
    pub full_amount: i64,
    pub comment: Option<String>,
}
