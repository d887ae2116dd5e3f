//! Web服务模块
//!
//! 提供 HTTP API 接口和文档服务

use color_eyre::Result;
use database::{
    DatabasePool, DonationRepository, DonationRepositoryTrait, MemoryDatabase, ProjectRepository,
    ProjectRepositoryTrait, UserRepository, UserRepositoryTrait,
};
use shared_lib::AuthConfig;
use std::sync::Arc;
use tokio::sync::watch::Receiver;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod auth;
pub mod models;
pub mod routes;
pub mod services;

use auth::{Argon2Hasher, JwtAuth, PasswordHasher};
use models::err::AppError;
use services::{DonationService, ProjectService, UserService};

/// 应用共享状态
///
/// 所有服务内部都是 `Arc`，克隆开销很小
#[derive(Clone)]
pub struct AppState {
    pub projects: ProjectService,
    pub donations: DonationService,
    pub users: UserService,
    pub auth: Arc<JwtAuth>,
}

impl AppState {
    pub fn new(
        projects: Arc<dyn ProjectRepositoryTrait>,
        donations: Arc<dyn DonationRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasher>,
        auth: JwtAuth,
    ) -> Self {
        Self {
            projects: ProjectService::new(projects),
            donations: DonationService::new(donations),
            users: UserService::new(users, hasher),
            auth: Arc::new(auth),
        }
    }

    /// 使用 PostgreSQL 仓库
    pub fn with_pool(pool: DatabasePool, config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self::new(
            Arc::new(ProjectRepository::new(pool.clone())),
            Arc::new(DonationRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool)),
            Arc::new(Argon2Hasher::default()),
            JwtAuth::new(config.secret.as_bytes(), config.token_lifetime_seconds)?,
        ))
    }

    /// 使用内存仓库，三个仓库共享同一个 [`MemoryDatabase`]
    pub fn in_memory(db: MemoryDatabase, hasher: Arc<dyn PasswordHasher>, auth: JwtAuth) -> Self {
        Self::new(Arc::new(db.clone()), Arc::new(db.clone()), Arc::new(db), hasher, auth)
    }
}

/// 根据配置创建第一个超级管理员
pub async fn bootstrap_superuser(state: &AppState, config: &AuthConfig) -> Result<()> {
    match (config.superuser_email.as_deref(), config.superuser_password.as_deref()) {
        (Some(email), Some(password)) => {
            state.users.ensure_superuser(email, password).await?;
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("⚠️ SUPERUSER_EMAIL 和 SUPERUSER_PASSWORD 需要同时设置，跳过超级管理员初始化");
        }
        (None, None) => {}
    }
    Ok(())
}

/// 启动 Web 服务
pub async fn start_web_service(state: AppState, bind_addr: &str, mut shutdown_rx: Receiver<bool>) -> Result<()> {
    let router = routes::create_app_router(state).layer(TraceLayer::new_for_http());

    info!("🚀 启动 Web Service 在 {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            // 发送端被丢弃时同样视为关闭信号
            let _ = shutdown_rx.changed().await;
            info!("🛑 Web Service 正在关闭...");
        })
        .await?;

    Ok(())
}
