use chrono::NaiveDateTime;
use database::CharityProject;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 新建慈善项目
///
/// 服务端维护的字段（`id`、`invested_amount`、`fully_invested`、`created_date`、`close_date`）
/// 不允许传入，否则返回422
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectCreate {
    #[schema(example = "Food for cats")]
    #[validate(length(min = 1, max = 100))]
    /// 项目名称，全局唯一
    pub name: String,

    #[schema(example = "Buying food for homeless cats")]
    #[validate(length(min = 1))]
    /// 项目描述
    pub description: String,

    #[schema(example = 1000)]
    #[validate(range(min = 1))]
    /// 目标筹款金额
    pub full_amount: i64,
}

impl From<ProjectCreate> for database::ProjectCreate {
    fn from(project: ProjectCreate) -> Self {
        Self {
            name: project.name,
            description: project.description,
            full_amount: project.full_amount,
        }
    }
}

/// 更新慈善项目，所有字段均为可选
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectUpdate {
    #[schema(example = "Food for cats and dogs")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[schema(example = 2000)]
    #[validate(range(min = 1))]
    /// 新的目标金额，不能小于已筹集金额
    pub full_amount: Option<i64>,
}

impl From<ProjectUpdate> for database::ProjectUpdate {
    fn from(update: ProjectUpdate) -> Self {
        Self {
            name: update.name,
            description: update.description,
            full_amount: update.full_amount,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq)]
pub struct ProjectInfo {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Food for cats")]
    pub name: String,

    pub description: String,

    #[schema(example = 1000)]
    pub full_amount: i64,

    #[schema(example = 0)]
    /// 已筹集金额
    pub invested_amount: i64,

    pub fully_invested: bool,

    pub created_date: NaiveDateTime,

    /// 项目筹满的时间，未筹满时不返回该字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<NaiveDateTime>,
}

impl From<CharityProject> for ProjectInfo {
    fn from(project: CharityProject) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            full_amount: project.full_amount,
            invested_amount: project.invested_amount,
            fully_invested: project.fully_invested,
            created_date: project.created_date,
            close_date: project.close_date,
        }
    }
}
