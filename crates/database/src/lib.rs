//! 数据库操作模块
//!
//! 这个模块提供了数据库连接、迁移、查询等功能。
//!
//! 新建项目/捐款时的资金分配在仓库层的同一个事务中完成，
//! 分配算法本身见 [`shared_lib::investment`]。

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{initialize_database, run_migrations, DatabasePool};
pub use error::DatabaseError;
pub use models::{
    CharityProject, Donation, DonationCreate, ProjectCreate, ProjectUpdate, User, UserCreate, UserUpdate,
};
pub use repositories::{
    DonationRepository, DonationRepositoryTrait, MemoryDatabase, ProjectRepository, ProjectRepositoryTrait,
    UserRepository, UserRepositoryTrait,
};

/// 数据库操作结果类型
pub type DatabaseResult<T> = Result<T, DatabaseError>;
