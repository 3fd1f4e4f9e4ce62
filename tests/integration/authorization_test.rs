//! Integration tests for the authorization gates behind the HTTP extractors.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;

use gatekeep_auth::jwt::SubjectClaims;
use gatekeep_auth::{TokenCodec, TokenKind};
use gatekeep_entity::user::UserRole;
use gatekeep_store::UserStore;

const STRONG: &str = "Granite-Harbor-42-Lantern";

#[tokio::test]
async fn test_me_requires_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
    assert_eq!(response.www_authenticate.as_deref(), Some("Bearer"));

    let basic = app
        .request_with_authorization("GET", "/api/auth/me", None, Some("Basic cm9vdDpwdw=="))
        .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
    assert_eq!(basic.error_code(), "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_me_with_lowercase_scheme() {
    let app = helpers::TestApp::new().await;
    let token = app.login("root", STRONG).await;

    let response = app
        .request_with_authorization(
            "GET",
            "/api/auth/me",
            None,
            Some(&format!("bearer {token}")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["role"], "admin");
    assert!(response.data()["last_login_at"].is_string());
}

#[tokio::test]
async fn test_refresh_token_cannot_authorize() {
    let app = helpers::TestApp::new().await;
    let pair = app.login_pair("root", STRONG).await;

    let response = app
        .request("GET", "/api/auth/me", None, pair["refresh_token"].as_str())
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_forged_expired_and_tampered_tokens() {
    let app = helpers::TestApp::new().await;
    let root = app
        .store
        .find_by_handle_or_email("root")
        .await
        .unwrap()
        .unwrap();
    let subject = SubjectClaims::from(&root);

    let forged = TokenCodec::from_secret(b"some-other-secret-of-sufficient-length")
        .encode(&subject, TokenKind::Access, Duration::minutes(5))
        .unwrap();
    let expired = TokenCodec::from_secret(helpers::SECRET.as_bytes())
        .encode(&subject, TokenKind::Access, Duration::seconds(-5))
        .unwrap();

    let genuine = app.login("root", STRONG).await;
    let mut tampered = genuine.clone().into_bytes();
    let idx = tampered.len() - 3;
    tampered[idx] = if tampered[idx] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    for token in [forged.token.as_str(), expired.token.as_str(), tampered.as_str(), "garbage"] {
        let response = app.request("GET", "/api/auth/me", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "token {token}");
        assert_eq!(response.error_code(), "INVALID_TOKEN");
    }
}

#[tokio::test]
async fn test_disabled_account_token_is_refused() {
    let app = helpers::TestApp::new().await;
    let user = app
        .create_test_user("alice", "CorrectPass1", UserRole::User, true)
        .await;
    let token = app.login("alice", "CorrectPass1").await;

    app.store.set_active(user.id, false).await.unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_self_deactivation_disables_next_request() {
    let app = helpers::TestApp::new().await;
    let alice = app
        .create_test_user("alice", "CorrectPass1", UserRole::User, true)
        .await;
    let token = app.login("alice", "CorrectPass1").await;
    let path = format!("/api/users/{}/deactivate", alice.id);

    let response = app.request("POST", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_active"], false);

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_deactivating_someone_else_needs_admin() {
    let app = helpers::TestApp::new().await;
    let alice = app
        .create_test_user("alice", "CorrectPass1", UserRole::User, true)
        .await;
    app.create_test_user("bob", "CorrectPass1", UserRole::User, true)
        .await;
    let path = format!("/api/users/{}/deactivate", alice.id);

    let bob_token = app.login("bob", "CorrectPass1").await;
    let response = app.request("POST", &path, None, Some(&bob_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");
    assert!(app.store.find_by_id(alice.id).await.unwrap().unwrap().is_active);

    let admin_token = app.login("root", STRONG).await;
    let response = app.request("POST", &path, None, Some(&admin_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!app.store.find_by_id(alice.id).await.unwrap().unwrap().is_active);

    let response = app.request("POST", &path, None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_gate_on_user_lookup() {
    let app = helpers::TestApp::new().await;
    let alice = app
        .create_test_user("alice", "CorrectPass1", UserRole::User, true)
        .await;
    app.create_test_user("mod", "CorrectPass1", UserRole::Moderator, true)
        .await;
    let path = format!("/api/users/{}", alice.id);

    let user_token = app.login("alice", "CorrectPass1").await;
    let response = app.request("GET", &path, None, Some(&user_token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "FORBIDDEN");

    let mod_token = app.login("mod", "CorrectPass1").await;
    let response = app.request("GET", &path, None, Some(&mod_token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "alice");

    let admin_token = app.login("root", STRONG).await;
    let missing = format!("/api/users/{}", gatekeep_core::UserId::new());
    let response = app.request("GET", &missing, None, Some(&admin_token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_demotion_takes_effect_before_token_expiry() {
    let app = helpers::TestApp::new().await;
    let target = app
        .create_test_user("target", "CorrectPass1", UserRole::User, true)
        .await;
    let boss = app
        .create_test_user("boss", "CorrectPass1", UserRole::Moderator, true)
        .await;
    let token = app.login("boss", "CorrectPass1").await;
    let path = format!("/api/users/{}", target.id);

    assert_eq!(
        app.request("GET", &path, None, Some(&token)).await.status,
        StatusCode::OK
    );

    app.store.set_role(boss.id, UserRole::User).await.unwrap();

    assert_eq!(
        app.request("GET", &path, None, Some(&token)).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_status_with_optional_auth() {
    let app = helpers::TestApp::new().await;

    let anonymous = app.request("GET", "/api/auth/status", None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.data()["authenticated"], false);
    assert!(anonymous.data().get("user").is_none());

    let token = app.login("root", STRONG).await;
    let signed_in = app.request("GET", "/api/auth/status", None, Some(&token)).await;
    assert_eq!(signed_in.data()["authenticated"], true);
    assert_eq!(signed_in.data()["user"]["username"], "root");

    let bad = app
        .request("GET", "/api/auth/status", None, Some("garbage"))
        .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
}
