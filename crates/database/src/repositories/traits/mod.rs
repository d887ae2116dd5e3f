//! 数据库仓库 trait 定义
//!
//! 这里定义了各种数据库仓库的抽象接口
//!
//! ## Repository Trait 设计模式 🎯
//!
//! 所有 Repository trait 都遵循统一的约束：
//!
//! ```rust,ignore
//! #[async_trait::async_trait]
//! pub trait XxxRepositoryTrait: Send + Sync + 'static {
//!     // 异步方法定义...
//! }
//! ```
//!
//! - `Send + Sync`：Repository 实例会在多个并发请求之间共享
//! - `'static`：作为应用服务长期存活，不依赖短期引用
//!
//! 这里刻意没有要求 `Clone`，这样 trait 是对象安全的，Web层可以持有
//! `Arc<dyn ProjectRepositoryTrait>`，在生产环境注入 PostgreSQL 实现，
//! 在测试中注入 [`MemoryDatabase`](crate::MemoryDatabase)。
//!
//! ### 资金分配 💰
//!
//! `create_project` 和 `create_donation` 不只是插入一行数据：
//! 实现方需要在同一个事务中完成"插入 → 锁定对手方未完成记录 → 分配 → 回写"，
//! 要么全部成功，要么全部回滚。

pub mod donation;
pub mod project;
pub mod user;

// 重新导出
pub use donation::DonationRepositoryTrait;
pub use project::ProjectRepositoryTrait;
pub use user::UserRepositoryTrait;
