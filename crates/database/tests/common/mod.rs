//! PostgreSQL 测试容器
//!
//! 每个测试启动一个独立的 postgres 容器并执行迁移，需要本机可用的 Docker

#![allow(dead_code)]

use std::time::Duration;

use database::{run_migrations, DatabasePool, UserCreate, UserRepository, UserRepositoryTrait};
use rstest::fixture;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

pub type PgContainer = ContainerAsync<GenericImage>;

const MAX_RETRIES: u32 = 7;

/// 启动容器，返回容器句柄（需要持有到测试结束）和已迁移的连接池
#[fixture]
pub async fn postgres() -> (PgContainer, DatabasePool) {
    let container = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(5432.tcp())
        .with_wait_for(WaitFor::message_on_stderr("database system is ready to accept connections"))
        .with_startup_timeout(Duration::from_secs(120))
        .with_env_var("POSTGRES_HOST_AUTH_METHOD", "trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get PostgreSQL port");
    let url = format!("postgres://postgres@localhost:{port}/postgres?sslmode=disable");

    // initdb 结束后 postgres 会重启一次，第一次连接可能失败
    let mut retry = 0;
    let pool = loop {
        match PgPoolOptions::new().max_connections(5).connect(&url).await {
            Ok(pool) => break pool,
            Err(_) if retry < MAX_RETRIES => {
                retry += 1;
                tokio::time::sleep(Duration::from_millis(200 * 2_u64.pow(retry))).await;
            }
            Err(e) => panic!("Failed to connect to PostgreSQL after {MAX_RETRIES} retries: {e}"),
        }
    };

    run_migrations(&pool).await.expect("Failed to run migrations");
    (container, pool)
}

/// 捐款需要关联一个真实存在的用户
pub async fn create_donor(pool: &DatabasePool, email: &str) -> i32 {
    UserRepository::new(pool.clone())
        .create_user(UserCreate {
            email: email.to_string(),
            hashed_password: "hashed".to_string(),
            is_active: true,
            is_superuser: false,
            is_verified: false,
            first_name: None,
            last_name: None,
            birthday: None,
        })
        .await
        .expect("Failed to create donor")
        .id
}
