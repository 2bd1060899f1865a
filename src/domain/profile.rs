//! User skin profile

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Skin type classification used by both the profile and the per-product
/// skin-type score map. Serialized in the server's SCREAMING_CASE form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    /// Wire form, as used in query parameters and score-map keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oily => "OILY",
            Self::Dry => "DRY",
            Self::Combination => "COMBINATION",
            Self::Normal => "NORMAL",
            Self::Sensitive => "SENSITIVE",
        }
    }
}

/// Personal-care profile the recommendation scorer ranks against.
///
/// `allergies` entries are lowercase-trimmed ingredient-name tokens; the
/// scorer normalizes INCI names the same way before matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: i64,
    pub skin_type: SkinType,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Partial profile update payload. Only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<SkinType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concerns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
}

impl UserProfile {
    /// Apply a partial update in place. Allergy tokens are normalized to the
    /// lowercase-trimmed form the scorer matches against.
    pub fn apply_update(&mut self, update: &UserProfileUpdate) {
        if let Some(skin_type) = update.skin_type {
            self.skin_type = skin_type;
        }
        if let Some(concerns) = &update.concerns {
            self.concerns = concerns.clone();
        }
        if let Some(allergies) = &update.allergies {
            self.allergies = allergies
                .iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect();
        }
        if let Some(pregnant) = update.pregnant {
            self.pregnant = pregnant;
        }
        if let Some(goals) = &update.goals {
            self.goals = goals.clone();
        }
    }
}
