//! 捐款仓库 trait 定义

use crate::models::donation::{Donation, DonationCreate};
use crate::DatabaseResult;

/// 捐款仓库trait定义
#[async_trait::async_trait]
pub trait DonationRepositoryTrait: Send + Sync + 'static {
    /// 创建捐款
    ///
    /// 插入捐款后，按创建时间从早到晚投入到未筹满的项目中。
    async fn create_donation(&self, donation: DonationCreate) -> DatabaseResult<Donation>;

    /// 查询所有捐款，按ID升序
    async fn list_donations(&self) -> DatabaseResult<Vec<Donation>>;

    /// 查询指定用户的捐款，按ID升序
    async fn list_user_donations(&self, user_id: i32) -> DatabaseResult<Vec<Donation>>;
}
