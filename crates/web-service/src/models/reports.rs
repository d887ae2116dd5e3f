use chrono::TimeDelta;
use database::CharityProject;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 已关闭项目的筹款耗时报表行
#[derive(Deserialize, Debug, ToSchema, Serialize, PartialEq)]
pub struct ClosedProjectReport {
    #[schema(example = "Food for cats")]
    pub name: String,

    pub description: String,

    /// 从创建到筹满的耗时
    #[schema(example = "2 days, 03:04:05")]
    pub collection_time: String,
}

impl ClosedProjectReport {
    /// 未关闭的项目没有筹款耗时，返回 `None`
    pub fn from_project(project: CharityProject) -> Option<Self> {
        let close_date = project.close_date?;
        Some(Self {
            collection_time: format_collection_time(close_date - project.created_date),
            name: project.name,
            description: project.description,
        })
    }
}

/// 格式化为 `<d> day(s), HH:MM:SS`，负数按0处理
pub fn format_collection_time(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    let unit = if days == 1 { "day" } else { "days" };
    format!("{days} {unit}, {hours:02}:{minutes:02}:{seconds:02}")
}
