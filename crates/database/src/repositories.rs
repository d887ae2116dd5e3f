//! 数据库仓库模块
//!
//! 这里定义数据库操作的Repository层

mod funds;
pub mod donation;
pub mod memory;
pub mod project;
pub mod traits;
pub mod user;

// 重新导出具体的类型
pub use donation::DonationRepository;
pub use memory::MemoryDatabase;
pub use project::ProjectRepository;
pub use traits::{DonationRepositoryTrait, ProjectRepositoryTrait, UserRepositoryTrait};
pub use user::UserRepository;
