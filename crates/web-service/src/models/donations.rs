use chrono::NaiveDateTime;
use database::Donation;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建捐款
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct DonationCreate {
    #[schema(example = 500)]
    #[validate(range(min = 1))]
    /// 捐款金额
    pub full_amount: i64,

    #[schema(example = "For the cats")]
    pub comment: Option<String>,
}

/// 捐款人看到的捐款信息，不包含分配情况
#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq)]
pub struct UserDonationInfo {
    pub id: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub full_amount: i64,

    pub created_date: NaiveDateTime,
}

impl From<Donation> for UserDonationInfo {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            comment: donation.comment,
            full_amount: donation.full_amount,
            created_date: donation.created_date,
        }
    }
}

/// 超级管理员看到的完整捐款信息
#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq)]
pub struct DonationInfo {
    pub id: i32,

    pub user_id: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub full_amount: i64,

    /// 已投入到项目中的金额
    pub invested_amount: i64,

    pub fully_invested: bool,

    pub created_date: NaiveDateTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDateTime>,
}

impl From<Donation> for DonationInfo {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            user_id: donation.user_id,
            comment: donation.comment,
            full_amount: donation.full_amount,
            invested_amount: donation.invested_amount,
            fully_invested: donation.fully_invested,
            created_date: donation.created_date,
            close_date: donation.close_date,
        }
    }
}
