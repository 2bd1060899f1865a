//! Authentication session management
//!
//! Bootstraps a session from the persisted token pair, signs in/out and
//! keeps the current account hydrated. The token store is the single
//! holder of credentials; this manager only orchestrates it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::application::messages;
use crate::domain::auth::{AuthCredentials, AuthUser, TokenPair};
use crate::domain::error::ApiResult;
use crate::domain::gateway::AuthGateway;
use crate::infrastructure::token_store::TokenStore;

pub struct AuthManager<G> {
    gateway: Arc<G>,
    tokens: Arc<TokenStore>,
    user: RwLock<Option<AuthUser>>,
    error: RwLock<Option<String>>,
}

impl<G: AuthGateway> AuthManager<G> {
    pub fn new(gateway: Arc<G>, tokens: Arc<TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            user: RwLock::new(None),
            error: RwLock::new(None),
        }
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        self.user.read().await.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// Authenticated means both a held token and a hydrated account.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated().await && self.user.read().await.is_some()
    }

    /// Resume a persisted session. The token store already discarded
    /// expired pairs at load; a failing `/auth/me` clears the rest.
    pub async fn bootstrap(&self) {
        if !self.tokens.is_authenticated().await {
            return;
        }
        if let Err(err) = self.refetch_user().await {
            warn!("Stored session invalid, signing out: {}", err);
            self.logout().await;
        }
    }

    pub async fn login(&self, credentials: &AuthCredentials) -> ApiResult<AuthUser> {
        *self.error.write().await = None;
        let response = match self.gateway.login(credentials).await {
            Ok(response) => response,
            Err(err) => {
                *self.error.write().await = Some(messages::LOGIN_FAILED.to_string());
                return Err(err);
            }
        };

        if let Err(err) = self
            .tokens
            .store(TokenPair {
                access_token: response.access_token,
                refresh_token: response.refresh_token,
            })
            .await
        {
            warn!("Failed to persist session tokens: {}", err);
        }

        *self.user.write().await = Some(response.user.clone());
        info!("Signed in as {}", response.user.username);
        Ok(response.user)
    }

    pub async fn signup(&self, credentials: &AuthCredentials) -> ApiResult<()> {
        *self.error.write().await = None;
        match self.gateway.signup(credentials).await {
            Ok(()) => Ok(()),
            Err(err) => {
                *self.error.write().await = Some(messages::SIGNUP_FAILED.to_string());
                Err(err)
            }
        }
    }

    /// Re-fetch the current account with the held token.
    pub async fn refetch_user(&self) -> ApiResult<AuthUser> {
        let user = self.gateway.me().await?;
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Clear the session: tokens, account and error state.
    pub async fn logout(&self) {
        self.tokens.clear().await;
        *self.user.write().await = None;
        *self.error.write().await = None;
    }
}
