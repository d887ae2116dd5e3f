//! 集成测试公共代码
//!
//! 使用内存仓库启动完整的路由，不依赖 PostgreSQL。

#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use database::MemoryDatabase;
use serde_json::Value;
use tower::ServiceExt;
use web_service::auth::{Argon2Hasher, JwtAuth};
use web_service::models::users::UserRegister;
use web_service::routes::create_app_router;
use web_service::AppState;

pub const SUPERUSER_EMAIL: &str = "root@example.com";
pub const USER_EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "chimichangas4life";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: MemoryDatabase,
    pub superuser_token: String,
    pub user_token: String,
    pub user_id: i32,
}

impl TestApp {
    /// 创建一个超级管理员和一个普通用户
    pub async fn new() -> Self {
        let db = MemoryDatabase::new();
        let hasher = Argon2Hasher::with_params(Params::new(256, 1, 1, None).unwrap());
        let state = AppState::in_memory(db.clone(), Arc::new(hasher), JwtAuth::new(b"test-secret", 3600).unwrap());

        let superuser = state
            .users
            .ensure_superuser(SUPERUSER_EMAIL, PASSWORD)
            .await
            .unwrap()
            .unwrap();
        let user = state
            .users
            .register(UserRegister {
                email: USER_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                first_name: None,
                last_name: None,
                birthday: None,
                is_active: None,
                is_superuser: None,
                is_verified: None,
            })
            .await
            .unwrap();

        Self {
            router: create_app_router(state.clone()),
            superuser_token: state.auth.issue(superuser.id).unwrap(),
            user_token: state.auth.issue(user.id).unwrap(),
            user_id: user.id,
            state,
            db,
        }
    }

    /// 发送请求，返回状态码和json响应（非json响应返回 `Value::Null`）
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/jwt/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn create_project(&self, name: &str, full_amount: i64) -> Value {
        let body = serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "full_amount": full_amount,
        });
        let (status, project) = self
            .request(Method::POST, "/api/v1/projects", Some(&self.superuser_token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{project}");
        project
    }

    pub async fn donate(&self, full_amount: i64) -> Value {
        let body = serde_json::json!({ "full_amount": full_amount });
        let (status, donation) = self
            .request(Method::POST, "/api/v1/donation", Some(&self.user_token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{donation}");
        donation
    }

    pub async fn get_project(&self, id: &Value) -> (StatusCode, Value) {
        self.request(Method::GET, &format!("/api/v1/projects/{id}"), None, None).await
    }

    /// 超级管理员视角的所有捐款
    pub async fn all_donations(&self) -> Vec<Value> {
        let (status, donations) = self
            .request(Method::GET, "/api/v1/donation", Some(&self.superuser_token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        donations.as_array().cloned().unwrap_or_default()
    }
}
