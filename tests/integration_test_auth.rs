mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_then_me() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": "devotee",
                "email": "Devotee@Temple.test",
                "password": "secret-pass-1"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["username"], "devotee");
    // Emails are normalized to lowercase on account creation.
    assert_eq!(body["user"]["email"], "devotee@temple.test");
    assert_eq!(body["user"]["role"], "user");

    let me_res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(me_res.status(), StatusCode::OK);
    let me = parse_body(me_res).await;
    assert_eq!(me["email"], "devotee@temple.test");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.seed_user("taken@temple.test", "first-pass-1", "user").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": "other",
                "email": "taken@temple.test",
                "password": "second-pass-1"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/register")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "username": "weak",
                "email": "weak@temple.test",
                "password": "abc"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success_and_wrong_password() {
    let app = TestApp::new().await;
    app.seed_user("priest@temple.test", "om-namah-1", "user").await;

    let token = app.login("priest@temple.test", "om-namah-1").await;
    assert!(!token.is_empty());

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "priest@temple.test",
                "password": "wrong-pass"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_unauthorized() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "email": "ghost@temple.test",
                "password": "whatever-1"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new().await;

    let no_token = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);

    let garbage = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/auth/me")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_endpoints_reject_regular_users() {
    let app = TestApp::new().await;
    let user_token = app.user_token().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/qr")
            .header(header::AUTHORIZATION, format!("Bearer {}", user_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
