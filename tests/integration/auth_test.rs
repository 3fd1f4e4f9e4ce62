//! Integration tests for registration, login, refresh, and password change.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use gatekeep_entity::user::UserRole;
use gatekeep_store::UserStore;

const STRONG: &str = "Granite-Harbor-42-Lantern";

#[tokio::test]
async fn test_login_success_by_username_and_email() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser", "CorrectPass1", UserRole::User, true)
        .await;

    for handle in ["testuser", "testuser@test.com"] {
        let pair = app.login_pair(handle, "CorrectPass1").await;
        assert!(pair["access_token"].is_string());
        assert!(pair["refresh_token"].is_string());
        assert_eq!(pair["token_type"], "bearer");
        let expires_in = pair["expires_in"].as_i64().unwrap();
        assert!((30 * 60 - 5..=30 * 60).contains(&expires_in));
    }
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("testuser2", "CorrectPass1", UserRole::User, true)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "testuser2", "password": "WrongPass1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(response.www_authenticate.as_deref(), Some("Bearer"));
}

#[tokio::test]
async fn test_login_nonexistent_user_is_indistinguishable() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("known", "CorrectPass1", UserRole::User, true)
        .await;

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": "CorrectPass1" })),
            None,
        )
        .await;
    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "known", "password": "WrongPass1" })),
            None,
        )
        .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, wrong.status);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_login_disabled_account() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("sleeper", "CorrectPass1", UserRole::User, false)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "sleeper", "password": "CorrectPass1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_login_requires_fields() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");
}

#[tokio::test]
async fn test_refresh_returns_new_pair() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("refresher", "CorrectPass1", UserRole::User, true)
        .await;
    let pair = app.login_pair("refresher", "CorrectPass1").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": pair["refresh_token"] })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let renewed = response.data();
    assert_ne!(renewed["access_token"], pair["access_token"]);

    let me = app
        .request("GET", "/api/auth/me", None, renewed["access_token"].as_str())
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["username"], "refresher");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("mixup", "CorrectPass1", UserRole::User, true)
        .await;
    let access = app.login("mixup", "CorrectPass1").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": access })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_refresh_after_disable_is_refused() {
    let app = helpers::TestApp::new().await;
    let user = app
        .create_test_user("leaver", "CorrectPass1", UserRole::User, true)
        .await;
    let pair = app.login_pair("leaver", "CorrectPass1").await;

    app.store.set_active(user.id, false).await.unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": pair["refresh_token"] })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_register_then_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "newcomer",
                "email": "newcomer@example.com",
                "password": STRONG,
                "full_name": "New Comer",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["role"], "user");
    assert_eq!(response.data()["is_active"], true);
    assert!(response.data().get("password_hash").is_none());

    let token = app.login("newcomer@example.com", STRONG).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_rejects_duplicate_and_weak() {
    let app = helpers::TestApp::new().await;

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "root", "email": "other@example.com", "password": STRONG })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let weak = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "weakling", "email": "weak@example.com", "password": "password" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "bademail", "email": "not-an-email", "password": STRONG })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = helpers::TestApp::new().await;
    let token = app.login("root", STRONG).await;
    let new_password = "Velvet-Comet-97-Orchard";

    let wrong_current = app
        .request(
            "POST",
            "/api/auth/password",
            Some(json!({ "current_password": "Nope-Nope-1", "new_password": new_password })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::UNAUTHORIZED);

    let changed = app
        .request(
            "POST",
            "/api/auth/password",
            Some(json!({ "current_password": STRONG, "new_password": new_password })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "root", "password": STRONG })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    assert!(!app.login("root", new_password).await.is_empty());
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}
