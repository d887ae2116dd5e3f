//! 内存仓库实现
//!
//! 同时实现了项目、捐款、用户三个仓库trait，数据全部保存在内存中。
//! 分配逻辑和约束检查与 PostgreSQL 实现完全相同，主要用于Web层测试和本地调试。
//!
//! ```rust,ignore
//! let db = MemoryDatabase::new();
//! let projects: Arc<dyn ProjectRepositoryTrait> = Arc::new(db.clone());
//! let donations: Arc<dyn DonationRepositoryTrait> = Arc::new(db.clone());
//! ```

use crate::models::{
    CharityProject, Donation, DonationCreate, ProjectCreate, ProjectUpdate, User, UserCreate, UserUpdate,
};
use crate::repositories::funds;
use crate::repositories::traits::{DonationRepositoryTrait, ProjectRepositoryTrait, UserRepositoryTrait};
use crate::{DatabaseError, DatabaseResult};
use chrono::{NaiveDateTime, Utc};
use shared_lib::invest;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryState {
    projects: Vec<CharityProject>,
    donations: Vec<Donation>,
    users: Vec<User>,
    next_project_id: i32,
    next_donation_id: i32,
    next_user_id: i32,
}

impl MemoryState {
    /// 未完成的记录，按创建时间升序（与SQL的 `ORDER BY created_date, id` 一致）
    fn open_donations(&mut self) -> Vec<&mut Donation> {
        let mut open: Vec<&mut Donation> = self.donations.iter_mut().filter(|d| !d.fully_invested).collect();
        open.sort_by_key(|d| (d.created_date, d.id));
        open
    }

    fn open_projects(&mut self) -> Vec<&mut CharityProject> {
        let mut open: Vec<&mut CharityProject> = self.projects.iter_mut().filter(|p| !p.fully_invested).collect();
        open.sort_by_key(|p| (p.created_date, p.id));
        open
    }

    fn project_mut(&mut self, id: i32) -> DatabaseResult<&mut CharityProject> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("Charity project {id}")))
    }

    fn user_mut(&mut self, id: i32) -> DatabaseResult<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DatabaseError::not_found(format!("User {id}")))
    }
}

/// 内存数据库
///
/// 克隆是廉价的，所有克隆共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入项目（保留传入的ID和时间），用于准备测试数据
    pub async fn insert_project(&self, project: CharityProject) {
        let mut state = self.state.lock().await;
        state.next_project_id = state.next_project_id.max(project.id);
        state.projects.push(project);
    }

    /// 直接写入捐款（保留传入的ID和时间），用于准备测试数据
    pub async fn insert_donation(&self, donation: Donation) {
        let mut state = self.state.lock().await;
        state.next_donation_id = state.next_donation_id.max(donation.id);
        state.donations.push(donation);
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// 把 `Vec<&mut T>` 中分配的结果按位置写回
///
/// [`invest`] 需要 `&mut [T]`，这里先复制出来计算，再写回原记录
fn invest_into<T, C>(target: &mut T, open: Vec<&mut C>, now: NaiveDateTime) -> usize
where
    T: shared_lib::Investable,
    C: shared_lib::Investable + Clone,
{
    let mut counterparts: Vec<C> = open.iter().map(|c| (**c).clone()).collect();
    let touched = invest(target, &mut counterparts, now);
    for (slot, updated) in open.into_iter().zip(counterparts).take(touched) {
        *slot = updated;
    }
    touched
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for MemoryDatabase {
    async fn list_projects(&self) -> DatabaseResult<Vec<CharityProject>> {
        let state = self.state.lock().await;
        let mut projects = state.projects.clone();
        projects.sort_by_key(|p| p.id);
        Ok(projects)
    }

    async fn create_project(&self, project: ProjectCreate) -> DatabaseResult<CharityProject> {
        debug!("📝 [memory] 创建项目: {:?}", project);

        let mut state = self.state.lock().await;
        if state.projects.iter().any(|p| p.name == project.name) {
            return Err(DatabaseError::validation(format!("Project name {} already exists", project.name)));
        }

        let now = Self::now();
        state.next_project_id += 1;
        let mut created = CharityProject {
            id: state.next_project_id,
            name: project.name,
            description: project.description,
            full_amount: project.full_amount,
            invested_amount: 0,
            fully_invested: false,
            created_date: now,
            close_date: None,
        };

        let open = state.open_donations();
        invest_into(&mut created, open, now);

        state.projects.push(created.clone());
        Ok(created)
    }

    async fn get_project_by_id(&self, id: i32) -> DatabaseResult<CharityProject> {
        let mut state = self.state.lock().await;
        state.project_mut(id).map(|p| p.clone())
    }

    async fn find_project_by_name(&self, name: &str) -> DatabaseResult<Option<CharityProject>> {
        let state = self.state.lock().await;
        Ok(state.projects.iter().find(|p| p.name == name).cloned())
    }

    async fn update_project(&self, id: i32, update: ProjectUpdate) -> DatabaseResult<CharityProject> {
        debug!("🔄 [memory] 更新项目 {}: {:?}", id, update);

        let mut state = self.state.lock().await;
        if let Some(name) = &update.name {
            if state.projects.iter().any(|p| p.id != id && &p.name == name) {
                return Err(DatabaseError::validation("Project name already exists"));
            }
        }

        let project = state.project_mut(id)?;
        let closing = funds::check_project_update(project, &update)?;

        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = description;
        }
        if let Some(full_amount) = update.full_amount {
            project.full_amount = full_amount;
        }
        if closing {
            project.fully_invested = true;
            project.close_date = Some(Self::now());
        }

        Ok(project.clone())
    }

    async fn delete_project(&self, id: i32) -> DatabaseResult<CharityProject> {
        let mut state = self.state.lock().await;
        let project = state.project_mut(id)?;
        funds::check_project_delete(project)?;

        let position = state.projects.iter().position(|p| p.id == id);
        match position {
            Some(index) => Ok(state.projects.remove(index)),
            None => Err(DatabaseError::not_found(format!("Charity project {id}"))),
        }
    }

    async fn list_closed_projects(&self) -> DatabaseResult<Vec<CharityProject>> {
        let state = self.state.lock().await;
        let mut closed: Vec<CharityProject> = state.projects.iter().filter(|p| p.fully_invested).cloned().collect();
        closed.sort_by_key(|p| {
            let collection_time = p.close_date.map(|close| close - p.created_date);
            (collection_time, p.id)
        });
        Ok(closed)
    }
}

#[async_trait::async_trait]
impl DonationRepositoryTrait for MemoryDatabase {
    async fn create_donation(&self, donation: DonationCreate) -> DatabaseResult<Donation> {
        debug!("📝 [memory] 用户 {} 创建捐款: {}", donation.user_id, donation.full_amount);

        let mut state = self.state.lock().await;
        let now = Self::now();
        state.next_donation_id += 1;
        let mut created = Donation {
            id: state.next_donation_id,
            user_id: donation.user_id,
            comment: donation.comment,
            full_amount: donation.full_amount,
            invested_amount: 0,
            fully_invested: false,
            created_date: now,
            close_date: None,
        };

        let open = state.open_projects();
        invest_into(&mut created, open, now);

        state.donations.push(created.clone());
        Ok(created)
    }

    async fn list_donations(&self) -> DatabaseResult<Vec<Donation>> {
        let state = self.state.lock().await;
        let mut donations = state.donations.clone();
        donations.sort_by_key(|d| d.id);
        Ok(donations)
    }

    async fn list_user_donations(&self, user_id: i32) -> DatabaseResult<Vec<Donation>> {
        let state = self.state.lock().await;
        let mut donations: Vec<Donation> = state.donations.iter().filter(|d| d.user_id == user_id).cloned().collect();
        donations.sort_by_key(|d| d.id);
        Ok(donations)
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for MemoryDatabase {
    async fn create_user(&self, user: UserCreate) -> DatabaseResult<User> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::validation(format!("User {} already exists", user.email)));
        }

        state.next_user_id += 1;
        let created = User {
            id: state.next_user_id,
            email: user.email,
            hashed_password: user.hashed_password,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
            first_name: user.first_name,
            last_name: user.last_name,
            birthday: user.birthday,
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn get_user_by_id(&self, id: i32) -> DatabaseResult<User> {
        let mut state = self.state.lock().await;
        state.user_mut(id).map(|u| u.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: i32, update: UserUpdate) -> DatabaseResult<User> {
        let mut state = self.state.lock().await;
        if let Some(email) = &update.email {
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(DatabaseError::validation("Email already in use"));
            }
        }

        let user = state.user_mut(id)?;
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(hashed_password) = update.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(is_superuser) = update.is_superuser {
            user.is_superuser = is_superuser;
        }
        if let Some(is_verified) = update.is_verified {
            user.is_verified = is_verified;
        }
        if update.first_name.is_some() {
            user.first_name = update.first_name;
        }
        if update.last_name.is_some() {
            user.last_name = update.last_name;
        }
        if update.birthday.is_some() {
            user.birthday = update.birthday;
        }
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn project(name: &str, full_amount: i64) -> ProjectCreate {
        ProjectCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            full_amount,
        }
    }

    fn donation(full_amount: i64) -> DonationCreate {
        DonationCreate {
            user_id: 1,
            full_amount,
            comment: None,
        }
    }

    #[tokio::test]
    async fn donation_without_projects_stays_open() {
        let db = MemoryDatabase::new();

        let created = db.create_donation(donation(500)).await.unwrap();

        assert_eq!(created.invested_amount, 0);
        assert!(!created.fully_invested);
        assert!(created.close_date.is_none());
    }

    #[tokio::test]
    async fn new_project_absorbs_open_donations_oldest_first() {
        let db = MemoryDatabase::new();
        db.create_donation(donation(300)).await.unwrap();
        db.create_donation(donation(500)).await.unwrap();
        db.create_donation(donation(100)).await.unwrap();

        let created = db.create_project(project("Shelter", 600)).await.unwrap();
        assert_eq!(created.invested_amount, 600);
        assert!(created.fully_invested);
        assert!(created.close_date.is_some());

        let donations = db.list_donations().await.unwrap();
        let invested: Vec<(i64, bool)> = donations.iter().map(|d| (d.invested_amount, d.fully_invested)).collect();
        assert_eq!(invested, vec![(300, true), (300, false), (0, false)]);
    }

    #[tokio::test]
    async fn project_and_donations_reach_expected_balances() {
        let db = MemoryDatabase::new();
        let project_id = db.create_project(project("Shelter", 1000)).await.unwrap().id;

        let first = db.create_donation(donation(700)).await.unwrap();
        let second = db.create_donation(donation(400)).await.unwrap();
        let project = db.get_project_by_id(project_id).await.unwrap();

        assert_eq!((project.invested_amount, project.fully_invested), (1000, true));
        assert_eq!((first.invested_amount, first.fully_invested), (700, true));
        assert_eq!((second.invested_amount, second.fully_invested), (300, false));
        assert!(second.close_date.is_none());
    }

    #[tokio::test]
    async fn second_open_project_is_untouched() {
        let db = MemoryDatabase::new();
        db.create_project(project("First", 200)).await.unwrap();
        db.create_project(project("Second", 200)).await.unwrap();

        db.create_donation(donation(150)).await.unwrap();

        let projects = db.list_projects().await.unwrap();
        assert_eq!(projects[0].invested_amount, 150);
        assert_eq!(projects[1].invested_amount, 0);
    }

    #[tokio::test]
    async fn rejected_update_leaves_row_unchanged() {
        let db = MemoryDatabase::new();
        let id = db.create_project(project("Shelter", 1000)).await.unwrap().id;
        db.create_donation(donation(600)).await.unwrap();
        let before = db.get_project_by_id(id).await.unwrap();

        let update = ProjectUpdate {
            full_amount: Some(500),
            ..Default::default()
        };
        let err = db.update_project(id, update).await.unwrap_err();

        assert!(matches!(err, DatabaseError::ValidationError(_)));
        assert_eq!(db.get_project_by_id(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn lowering_target_to_invested_amount_closes_project() {
        let db = MemoryDatabase::new();
        let id = db.create_project(project("Shelter", 1000)).await.unwrap().id;
        db.create_donation(donation(600)).await.unwrap();

        let update = ProjectUpdate {
            full_amount: Some(600),
            ..Default::default()
        };
        let updated = db.update_project(id, update).await.unwrap();

        assert!(updated.fully_invested);
        assert!(updated.close_date.is_some());
    }

    #[tokio::test]
    async fn delete_respects_investments() {
        let db = MemoryDatabase::new();
        let invested = db.create_project(project("Invested", 1000)).await.unwrap().id;
        db.create_donation(donation(10)).await.unwrap();
        let fresh = db.create_project(project("Fresh", 1000)).await.unwrap().id;

        assert!(matches!(
            db.delete_project(invested).await.unwrap_err(),
            DatabaseError::ValidationError(_)
        ));
        db.delete_project(fresh).await.unwrap();
        assert!(db.get_project_by_id(fresh).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn closed_projects_sorted_by_collection_time() {
        let db = MemoryDatabase::new();
        let created = Utc::now().naive_utc();
        for (id, days) in [(1, 5), (2, 1), (3, 3)] {
            db.insert_project(CharityProject {
                id,
                name: format!("Project {id}"),
                description: "closed".to_string(),
                full_amount: 100,
                invested_amount: 100,
                fully_invested: true,
                created_date: created,
                close_date: Some(created + Duration::days(days)),
            })
            .await;
        }

        let closed = db.list_closed_projects().await.unwrap();
        let ids: Vec<i32> = closed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
