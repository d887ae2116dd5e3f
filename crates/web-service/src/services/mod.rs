//! 服务层模块
//!
//! 业务规则（名称唯一、权限字段过滤、密码哈希等）放在这里，
//! 持久化和资金分配交给 [`database`] 仓库层。
//!
//! 服务持有 `Arc<dyn ...RepositoryTrait>`，启动时注入 PostgreSQL 实现，测试时注入 [`database::MemoryDatabase`]。

pub mod donation;
pub mod project;
pub mod user;

pub use donation::DonationService;
pub use project::ProjectService;
pub use user::UserService;
