//! Shared harness for HTTP integration tests
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dayflow_server::auth::hash_password;
use dayflow_server::core::build_router;
use dayflow_server::db::repository::employee::{self, NewEmployee};
use dayflow_server::{Config, ServerState};
use shared::models::{PersonalFields, PrivilegedFields, Role};

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub state: ServerState,
    router: Router,
}

/// A seeded account and a valid token for it
pub struct TestUser {
    pub id: i64,
    pub employee_id: String,
    pub token: String,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let state = ServerState::in_memory(Config::for_tests()).await.unwrap();
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Insert an employee with a profile and issue a token
    pub async fn user(&self, employee_id: &str, role: Role) -> TestUser {
        self.user_with(employee_id, role, PersonalFields::default(), PrivilegedFields::default())
            .await
    }

    pub async fn user_with(
        &self,
        employee_id: &str,
        role: Role,
        personal: PersonalFields,
        privileged: PrivilegedFields,
    ) -> TestUser {
        let created = employee::create(
            &self.state.pool,
            NewEmployee {
                employee_id: employee_id.to_string(),
                username: employee_id.to_lowercase(),
                email: format!("{}@example.com", employee_id.to_lowercase()),
                password_hash: hash_password(PASSWORD).unwrap(),
                role,
                personal,
                privileged,
            },
        )
        .await
        .unwrap();

        let token = self
            .state
            .get_jwt_service()
            .generate_token(created.id, &created.username, role)
            .unwrap();

        TestUser {
            id: created.id,
            employee_id: created.employee_id,
            token,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.send("GET", uri, Some(&user.token), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.send("POST", uri, Some(&user.token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.send("PUT", uri, Some(&user.token), Some(body)).await
    }

    /// Attendance rows for a user as `(date, status)`, oldest first
    pub async fn attendance_of(&self, user_id: i64) -> Vec<(String, String)> {
        sqlx::query_as::<_, (String, String)>(
            "SELECT date, status FROM attendance WHERE user_id = ? ORDER BY date",
        )
        .bind(user_id)
        .fetch_all(&self.state.pool)
        .await
        .unwrap()
    }

    pub async fn insert_attendance(&self, user_id: i64, date: &str, status: &str) {
        sqlx::query(
            "INSERT INTO attendance (user_id, date, status, created_at, updated_at) VALUES (?1, ?2, ?3, 0, 0)",
        )
        .bind(user_id)
        .bind(date)
        .bind(status)
        .execute(&self.state.pool)
        .await
        .unwrap();
    }
}
