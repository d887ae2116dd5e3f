//! 慈善项目数据库模型
//!
//! 定义慈善项目相关的数据库模型结构体

use chrono::NaiveDateTime;
use shared_lib::Investable;

/// 慈善项目，对应 `charity_project` 表
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CharityProject {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// 目标筹款金额
    pub full_amount: i64,
    /// 已筹集金额，由服务端维护
    pub invested_amount: i64,
    pub fully_invested: bool,
    pub created_date: NaiveDateTime,
    /// 仅在项目筹满时设置，之后不可修改
    pub close_date: Option<NaiveDateTime>,
}

impl Investable for CharityProject {
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

/// 项目创建参数
#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub full_amount: i64,
}

/// 项目更新参数
///
/// 所有字段都是可选的，`None`表示保持原值
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub full_amount: Option<i64>,
}
