//! 捐款服务

use std::sync::Arc;

use database::{Donation, DonationCreate, DonationRepositoryTrait};

use crate::models::err::AppError;

#[derive(Clone)]
pub struct DonationService {
    repository: Arc<dyn DonationRepositoryTrait>,
}

impl DonationService {
    pub fn new(repository: Arc<dyn DonationRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// 创建捐款，并按创建时间把金额投入未筹满的项目
    pub async fn create_donation(&self, donation: DonationCreate) -> Result<Donation, AppError> {
        Ok(self.repository.create_donation(donation).await?)
    }

    pub async fn list_donations(&self) -> Result<Vec<Donation>, AppError> {
        Ok(self.repository.list_donations().await?)
    }

    pub async fn list_user_donations(&self, user_id: i32) -> Result<Vec<Donation>, AppError> {
        Ok(self.repository.list_user_donations(user_id).await?)
    }
}
