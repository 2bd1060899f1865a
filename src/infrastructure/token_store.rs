//! Token persistence
//!
//! Holds the access/refresh token pair in memory and mirrors it to a small
//! JSON file so sessions survive restarts. Tokens whose JWT payload has
//! already expired are discarded at load time instead of being sent to the
//! server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::auth::TokenPair;

/// Whether a JWT's `exp` claim is in the past. Tokens that cannot be
/// decoded count as expired so they get cleared rather than replayed.
pub fn jwt_expired(token: &str, now: DateTime<Utc>) -> bool {
    let Some(payload) = token.split('.').nth(1) else {
        return true;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) else {
        return true;
    };
    let Ok(claims) = serde_json::from_slice::<Value>(&bytes) else {
        return true;
    };
    match claims.get("exp").and_then(Value::as_i64) {
        Some(exp) => exp <= now.timestamp(),
        None => true,
    }
}

/// In-memory token pair with optional file persistence.
pub struct TokenStore {
    path: Option<PathBuf>,
    tokens: RwLock<Option<TokenPair>>,
}

impl TokenStore {
    /// Volatile store, for tests and short-lived tools.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            tokens: RwLock::new(None),
        }
    }

    /// File-backed store. An existing file is loaded eagerly; an expired
    /// or unreadable pair is dropped.
    pub async fn open(path: PathBuf) -> Self {
        let tokens = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<TokenPair>(&raw) {
                Ok(pair) if !jwt_expired(&pair.access_token, Utc::now()) => Some(pair),
                Ok(_) => {
                    debug!("Stored access token expired, clearing session");
                    let _ = tokio::fs::remove_file(&path).await;
                    None
                }
                Err(e) => {
                    warn!("Unreadable token file {}: {}", path.display(), e);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: Some(path),
            tokens: RwLock::new(tokens),
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|pair| pair.access_token.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .map(|pair| pair.refresh_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Replace the held pair and persist it when a path is configured.
    pub async fn store(&self, pair: TokenPair) -> Result<()> {
        if let Some(path) = &self.path {
            let raw = serde_json::to_string_pretty(&pair)?;
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            tokio::fs::write(path, raw)
                .await
                .with_context(|| format!("writing token file {}", path.display()))?;
        }
        *self.tokens.write().await = Some(pair);
        Ok(())
    }

    /// Drop the held pair and its persisted copy.
    pub async fn clear(&self) {
        *self.tokens.write().await = None;
        if let Some(path) = &self.path {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}
