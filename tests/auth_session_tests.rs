//! Tests for session bootstrap, sign-in and sign-out.

mod common;

use std::sync::Arc;

use glowdex::application::auth::AuthManager;
use glowdex::domain::auth::{AuthCredentials, TokenPair};
use glowdex::infrastructure::token_store::TokenStore;

use common::*;

fn credentials() -> AuthCredentials {
    AuthCredentials {
        username: None,
        email: Some("user1@example.com".into()),
        password: "secret".into(),
    }
}

#[tokio::test]
async fn login_stores_tokens_and_hydrates_the_user() {
    let gateway = Arc::new(FakeAuthGateway::new());
    let tokens = Arc::new(TokenStore::in_memory());
    let manager = AuthManager::new(Arc::clone(&gateway), Arc::clone(&tokens));

    let user = manager.login(&credentials()).await.unwrap();
    assert_eq!(user.username, "user1");
    assert!(manager.is_authenticated().await);
    assert_eq!(tokens.access_token().await.as_deref(), Some("access.token.sig"));
}

#[tokio::test]
async fn failed_login_sets_the_fixed_message() {
    let gateway = Arc::new(FakeAuthGateway::new());
    gateway
        .login_script
        .lock()
        .unwrap()
        .push_back(Err(not_found()));
    let tokens = Arc::new(TokenStore::in_memory());
    let manager = AuthManager::new(Arc::clone(&gateway), Arc::clone(&tokens));

    assert!(manager.login(&credentials()).await.is_err());
    assert!(!manager.is_authenticated().await);
    assert_eq!(
        manager.error().await.as_deref(),
        Some(glowdex::application::messages::LOGIN_FAILED)
    );
}

#[tokio::test]
async fn bootstrap_resumes_a_stored_session() {
    let gateway = Arc::new(FakeAuthGateway::new());
    let tokens = Arc::new(TokenStore::in_memory());
    tokens
        .store(TokenPair {
            access_token: "stored.token.sig".into(),
            refresh_token: "refresh".into(),
        })
        .await
        .unwrap();
    let manager = AuthManager::new(Arc::clone(&gateway), Arc::clone(&tokens));

    manager.bootstrap().await;
    assert!(manager.is_authenticated().await);
    assert_eq!(manager.current_user().await.unwrap().id, 1);
}

#[tokio::test]
async fn bootstrap_clears_an_invalid_session() {
    let gateway = Arc::new(FakeAuthGateway::new());
    gateway.me_script.lock().unwrap().push_back(Err(not_found()));
    let tokens = Arc::new(TokenStore::in_memory());
    tokens
        .store(TokenPair {
            access_token: "stale.token.sig".into(),
            refresh_token: "refresh".into(),
        })
        .await
        .unwrap();
    let manager = AuthManager::new(Arc::clone(&gateway), Arc::clone(&tokens));

    manager.bootstrap().await;
    assert!(!manager.is_authenticated().await);
    assert!(tokens.access_token().await.is_none());
}

#[tokio::test]
async fn logout_clears_everything() {
    let gateway = Arc::new(FakeAuthGateway::new());
    let tokens = Arc::new(TokenStore::in_memory());
    let manager = AuthManager::new(Arc::clone(&gateway), Arc::clone(&tokens));

    manager.login(&credentials()).await.unwrap();
    manager.logout().await;

    assert!(!manager.is_authenticated().await);
    assert!(tokens.access_token().await.is_none());
    assert!(manager.current_user().await.is_none());
    assert!(manager.error().await.is_none());
}
