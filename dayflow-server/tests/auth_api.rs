//! Login, token checks and health

mod common;

use common::{PASSWORD, TestApp};
use http::StatusCode;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::Role;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let res = app.send("GET", "/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["status"], "ok");
    assert!(res.headers.contains_key("x-request-id"));

    let res = app.send("GET", "/health/detailed", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["database"]["status"], "ok");
}

#[tokio::test]
async fn login_accepts_username_email_or_employee_id() {
    let app = TestApp::new().await;
    let user = app.user("EMP010", Role::Employee).await;

    for login in ["emp010", "emp010@example.com", "EMP010"] {
        let res = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": login, "password": PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login as {login}");
        let body = res.json();
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["id"], user.id);
        assert_eq!(body["user"]["role"], "employee");
        assert!(body["user"].get("password_hash").is_none());
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.user("EMP011", Role::Employee).await;

    let wrong_password = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "emp011", "password": "nope" })),
        )
        .await;
    let unknown_user = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "ghost", "password": PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.json(), unknown_user.json());
    assert_eq!(wrong_password.json()["code"], ErrorCode::InvalidCredentials.code());
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = TestApp::new().await;
    let res = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "username": "", "password": "" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn me_returns_the_caller() {
    let app = TestApp::new().await;
    let hr = app.user("HR001", Role::Hr).await;

    let res = app.get("/api/auth/me", &hr).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["user"]["employee_id"], "HR001");
    assert_eq!(res.json()["user"]["role"], "hr");
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = TestApp::new().await;

    let missing = app.send("GET", "/api/leave/my-leaves", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json()["code"], ErrorCode::NotAuthenticated.code());

    let garbage = app.send("GET", "/api/leave/my-leaves", Some("not-a-jwt"), None).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.json()["code"], ErrorCode::TokenInvalid.code());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let user = app.user("EMP012", Role::Employee).await;
    let res = app.get("/api/nowhere", &user).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.json()["error"].as_str().is_some());
}

#[tokio::test]
async fn bootstrap_admin_can_log_in() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = dayflow_server::Config::for_tests();
    config.database_path = dir.path().join("dayflow.db").to_string_lossy().into_owned();
    let state = dayflow_server::ServerState::initialize(&config).await.unwrap();
    let router = dayflow_server::core::build_router(state);

    use http_body_util::BodyExt;
    use tower::ServiceExt;
    let req = http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            json!({
                "username": config.bootstrap_admin.username,
                "password": config.bootstrap_admin.password,
            })
            .to_string(),
        ))
        .unwrap();
    let res = router.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["role"], "admin");
}
