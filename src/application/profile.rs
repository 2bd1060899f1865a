//! Profile management
//!
//! Single owner of the in-memory user profile. Loads with a small retry
//! loop, exposes a read-only snapshot, and funnels every mutation through
//! an explicit three-phase optimistic update: snapshot the prior state,
//! apply the tentative state, then commit the server echo or restore the
//! snapshot on failure.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::application::messages;
use crate::domain::care::SkinAnalysisResult;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::gateway::ProfileGateway;
use crate::domain::profile::{UserProfile, UserProfileUpdate};

const LOAD_RETRY_DELAY: Duration = Duration::from_secs(2);
const LOAD_MAX_ATTEMPTS: u32 = 3;

#[derive(Error, Debug)]
pub enum ProfileUpdateError {
    #[error("no profile loaded to update")]
    NoProfile,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Owns the profile state; descendants observe snapshots and mutate only
/// through [`ProfileManager::update_profile`].
pub struct ProfileManager<G> {
    gateway: Arc<G>,
    profile: RwLock<Option<UserProfile>>,
    error: RwLock<Option<String>>,
}

impl<G: ProfileGateway> ProfileManager<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            profile: RwLock::new(None),
            error: RwLock::new(None),
        }
    }

    /// Read-only snapshot of the current profile.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.error.read().await.clone()
    }

    /// Load the profile, retrying transient failures with a fixed delay.
    /// Returns whether a profile is held afterwards.
    pub async fn load(&self) -> bool {
        for attempt in 1..=LOAD_MAX_ATTEMPTS {
            match self.gateway.get_profile().await {
                Ok(profile) => {
                    *self.profile.write().await = Some(profile);
                    *self.error.write().await = None;
                    return true;
                }
                Err(err) if attempt < LOAD_MAX_ATTEMPTS && err.is_retryable() => {
                    warn!(
                        "Retrying profile load... attempt {}/{}: {}",
                        attempt, LOAD_MAX_ATTEMPTS, err
                    );
                    tokio::time::sleep(LOAD_RETRY_DELAY).await;
                }
                Err(err) => {
                    warn!("Failed to load profile: {}", err);
                    *self.error.write().await = Some(messages::PROFILE_LOAD_FAILED.to_string());
                    return false;
                }
            }
        }
        false
    }

    /// Optimistic update.
    ///
    /// Phase 1 snapshots the held profile, phase 2 applies the tentative
    /// update so observers see it immediately, phase 3 commits the server
    /// echo or restores the snapshot.
    pub async fn update_profile(
        &self,
        update: UserProfileUpdate,
    ) -> Result<UserProfile, ProfileUpdateError> {
        // Phase 1: snapshot
        let snapshot = {
            let held = self.profile.read().await;
            held.clone().ok_or(ProfileUpdateError::NoProfile)?
        };

        // Phase 2: tentative state
        {
            let mut tentative = snapshot.clone();
            tentative.apply_update(&update);
            *self.profile.write().await = Some(tentative);
        }

        // Phase 3: commit or rollback
        match self.gateway.update_profile(&update).await {
            Ok(server_profile) => {
                *self.profile.write().await = Some(server_profile.clone());
                *self.error.write().await = None;
                info!("Profile updated for user {}", server_profile.user_id);
                Ok(server_profile)
            }
            Err(err) => {
                warn!("Profile update failed, rolling back: {}", err);
                *self.profile.write().await = Some(snapshot);
                *self.error.write().await = Some(messages::PROFILE_UPDATE_FAILED.to_string());
                Err(err.into())
            }
        }
    }

    /// Upload a skin photo for analysis. Single-shot beyond the
    /// transport's own retry loop.
    pub async fn analyze_skin_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<SkinAnalysisResult> {
        self.gateway.analyze_skin_image(image, file_name).await
    }
}
