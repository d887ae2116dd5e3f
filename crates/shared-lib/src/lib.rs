//! 🔧 共享库模块
//!
//! 这个模块包含了在多个服务之间共享的通用代码，包括：
//! - 程序配置
//! - 捐款与项目之间的投资分配算法

pub mod investment;
pub mod models;

// 重新导出常用类型
pub use investment::{invest, Investable};
pub use models::{AppConfig, AuthConfig, PoolConfig};
