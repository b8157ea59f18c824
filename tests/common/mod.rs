//! Shared harness for the HTTP integration tests.
//!
//! Each test gets its own SQLite file and a manually driven clock pinned
//! to 2023-07-14 12:00:00 UTC.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use fastzero_backend::{
    auth::{password::MIN_COST, ManualClock},
    create_router,
    db::Database,
    models::User,
    AppState, AuthConfig,
};
use jsonwebtoken::Algorithm;
use serde_json::Value;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const PASSWORD: &str = "testtest";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    _db_file: NamedTempFile,
}

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, 14, 12, 0, 0).unwrap()
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret_key: "integration-test-secret".to_string(),
        algorithm: Algorithm::HS256,
        access_token_ttl: Duration::minutes(30),
        bcrypt_cost: MIN_COST,
    }
}

pub fn spawn_app() -> TestApp {
    let db_file = NamedTempFile::new().unwrap();
    let db = Arc::new(Database::new(db_file.path().to_str().unwrap()).unwrap());
    let clock = Arc::new(ManualClock::new(noon()));
    let state = AppState::new(db, &auth_config(), clock.clone()).unwrap();

    TestApp {
        router: create_router(state.clone()),
        state,
        clock,
        _db_file: db_file,
    }
}

impl TestApp {
    /// Insert a user directly, hashing `PASSWORD`.
    pub fn create_user(&self, username: &str) -> User {
        let hash = self.state.auth.hasher().hash(PASSWORD).unwrap();
        self.state
            .db
            .create_user(username, &format!("{}@test.com", username), &hash)
            .unwrap()
    }

    pub async fn token_for(&self, user: &User) -> String {
        let (status, body) = self.login(&user.email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        let form = format!("username={}&password={}", encode(email), encode(password));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        json: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match json {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }
}

/// Minimal form encoding for the characters the tests use.
fn encode(value: &str) -> String {
    value.replace('%', "%25").replace('@', "%40").replace('&', "%26").replace('+', "%2B")
}
