//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatekeep_api::{AppState, build_app};
use gatekeep_auth::CredentialHasher;
use gatekeep_core::config::AppConfig;
use gatekeep_entity::user::{CreateUser, User, UserRole};
use gatekeep_store::{MemoryUserStore, UserStore};

pub const SECRET: &str = "integration-test-signing-secret-0123456789";

const TEST_CONFIG: &str = r#"
[auth]
signing_secret = "integration-test-signing-secret-0123456789"
hash_cost_factor = 1
hash_memory_kib = 1024

[bootstrap]
admin_username = "root"
admin_email = "root@example.com"
admin_password = "Granite-Harbor-42-Lantern"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct manipulation
    pub store: Arc<MemoryUserStore>,
    /// Application config
    pub config: AppConfig,
}

/// Captured response
pub struct TestResponse {
    pub status: StatusCode,
    pub www_authenticate: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application with a seeded admin `root`.
    pub async fn new() -> Self {
        let config = AppConfig::from_toml_str(TEST_CONFIG).expect("Failed to load test config");
        let store = Arc::new(MemoryUserStore::new());

        let state = AppState::new(config.clone(), store.clone()).expect("Failed to build state");
        gatekeep_api::seed_admin(&state)
            .await
            .expect("Failed to seed admin");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Create a user directly in the store, bypassing the password policy.
    pub async fn create_test_user(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
        is_active: bool,
    ) -> User {
        let hasher = CredentialHasher::new(&self.config.auth).expect("Failed to build hasher");
        let password_hash = hasher.hash(password).expect("Failed to hash password");
        self.store
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                password_hash,
                full_name: None,
                role,
                is_active,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Login and return the token pair body.
    pub async fn login_pair(&self, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.data().clone()
    }

    /// Login and return the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        self.login_pair(username, password).await["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Make an HTTP request with an optional bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let header = token.map(|t| format!("Bearer {t}"));
        self.request_with_authorization(method, path, body, header.as_deref())
            .await
    }

    /// Make an HTTP request with a raw `Authorization` header value.
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let www_authenticate = response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            www_authenticate,
            body,
        }
    }
}
