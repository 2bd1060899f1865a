//! Care-assistant wire types: routines, schedules, journal, skin analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One product step inside a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItem {
    pub routine_id: i64,
    pub product_id: i64,
    pub step: u32,
    pub time_of_day: String,
}

/// Named skincare routine owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub items: Vec<RoutineItem>,
}

/// Payload for creating a routine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoutineCreateRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RoutineItem>,
}

/// Reminder schedule tying a product to a cron expression and a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub cron_expr: String,
    pub channel: String,
}

/// Payload for creating a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCreateRequest {
    pub product_id: i64,
    pub cron_expr: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Photo attached to a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JournalPhoto {
    pub id: i64,
    pub entry_id: i64,
    pub url: String,
}

/// Skin-state journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub photos: Vec<JournalPhoto>,
}

/// Payload for creating a text journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryCreateRequest {
    pub user_id: i64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<DateTime<Utc>>,
}

/// Payload for submitting product feedback.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreateRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub rating: u8,
    pub comment: String,
    pub status: String,
}

/// Ingredient guidance returned by the skin-image analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGuidance {
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

/// Recommendations block of a skin analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysisRecommendations {
    #[serde(default)]
    pub ingredients: IngredientGuidance,
    #[serde(default)]
    pub products: Vec<i64>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

/// Result of the AI skin-image analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysisResult {
    pub skin_type: String,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub recommendations: SkinAnalysisRecommendations,
}
