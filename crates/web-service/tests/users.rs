mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, PASSWORD, USER_EMAIL};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.request(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_and_login() {
    let app = TestApp::new().await;
    let body = json!({"email": "new@example.com", "password": "password123"});

    let (status, user) = app.request(Method::POST, "/api/v1/auth/register", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "new@example.com");
    assert_eq!(user["is_superuser"], false);
    assert_eq!(user["is_active"], true);
    assert!(user.get("hashed_password").is_none());

    let (status, _) = app.request(Method::POST, "/api/v1/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, token) = app.login("new@example.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");

    let access_token = token["access_token"].as_str().unwrap_or_default().to_string();
    let (status, me) = app.request(Method::GET, "/api/v1/users/me", Some(&access_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user["id"]);
}

#[tokio::test]
async fn invalid_registration_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(Method::POST, "/api/v1/auth/register", None, Some(json!({"email": "nope", "password": "pw123"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body = json!({"email": "new@example.com", "password": "pw123", "role": "admin"});
    let (status, _) = app.request(Method::POST, "/api/v1/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn registration_ignores_privilege_fields() {
    let app = TestApp::new().await;
    let body = json!({
        "email": "new@example.com",
        "password": "pw123",
        "is_superuser": true,
        "is_verified": true,
        "is_active": false
    });

    let (status, user) = app.request(Method::POST, "/api/v1/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["is_superuser"], false);
    assert_eq!(user["is_verified"], false);
    assert_eq!(user["is_active"], true);

    let (status, _) = app.login("new@example.com", "pw123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app.login(USER_EMAIL, "wrong-password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.login("missing@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.login(USER_EMAIL, PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn user_cannot_grant_themselves_superuser() {
    let app = TestApp::new().await;

    let (status, me) = app
        .request(
            Method::PATCH,
            "/api/v1/users/me",
            Some(&app.user_token),
            Some(json!({"first_name": "Wade", "is_superuser": true})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["first_name"], "Wade");
    assert_eq!(me["is_superuser"], false);
}

#[tokio::test]
async fn only_superuser_manages_other_users() {
    let app = TestApp::new().await;
    let uri = format!("/api/v1/users/{}", app.user_id);

    let (status, _) = app.request(Method::GET, &uri, Some(&app.user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, user) = app.request(Method::GET, &uri, Some(&app.superuser_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], USER_EMAIL);

    let (status, user) = app
        .request(Method::PATCH, &uri, Some(&app.superuser_token), Some(json!({"is_active": false})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["is_active"], false);

    // 被停用的用户token失效
    let (status, _) = app.request(Method::GET, "/api/v1/users/me", Some(&app.user_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/v1/users/999", Some(&app.superuser_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
