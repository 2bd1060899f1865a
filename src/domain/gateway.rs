//! Gateway interfaces to the remote catalog API
//!
//! Contains trait definitions for the remote data access patterns the
//! application layer drives. HTTP implementations live in the
//! infrastructure layer; tests substitute hand-rolled fakes.

use async_trait::async_trait;

use super::auth::{AuthCredentials, AuthUser, LoginResponse};
use super::care::{
    FeedbackCreateRequest, JournalEntry, JournalEntryCreateRequest, JournalPhoto, Routine,
    RoutineCreateRequest, RoutineItem, Schedule, ScheduleCreateRequest, SkinAnalysisResult,
};
use super::error::ApiResult;
use super::product::{
    Ingredient, PageResult, ProductDetail, ProductSearchParams, ProductSummary, Review,
};
use super::profile::{UserProfile, UserProfileUpdate};

/// Product catalog reads: paginated search, detail, barcode and ingredient
/// lookups, per-product feedback.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn search_products(
        &self,
        params: &ProductSearchParams,
    ) -> ApiResult<PageResult<ProductSummary>>;
    async fn product_by_id(&self, product_id: i64) -> ApiResult<ProductDetail>;
    async fn product_by_barcode(&self, barcode: &str) -> ApiResult<ProductDetail>;
    async fn feedback_for_product(&self, product_id: i64) -> ApiResult<Vec<Review>>;
    async fn ingredient_by_id(&self, ingredient_id: i64) -> ApiResult<Ingredient>;
}

/// Personal profile reads/writes and skin-image analysis.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn get_profile(&self) -> ApiResult<UserProfile>;
    async fn update_profile(&self, update: &UserProfileUpdate) -> ApiResult<UserProfile>;
    async fn analyze_skin_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<SkinAnalysisResult>;
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &AuthCredentials) -> ApiResult<LoginResponse>;
    async fn signup(&self, credentials: &AuthCredentials) -> ApiResult<()>;
    async fn me(&self) -> ApiResult<AuthUser>;
}

/// Care-assistant CRUD: routines, schedules, journal, feedback.
#[async_trait]
pub trait CareGateway: Send + Sync {
    async fn routines(&self) -> ApiResult<Vec<Routine>>;
    async fn routine_by_id(&self, routine_id: i64) -> ApiResult<Routine>;
    async fn create_routine(&self, request: &RoutineCreateRequest) -> ApiResult<Routine>;
    async fn delete_routine(&self, routine_id: i64) -> ApiResult<()>;
    async fn add_routine_item(&self, routine_id: i64, item: &RoutineItem) -> ApiResult<Routine>;
    async fn remove_routine_item(&self, routine_id: i64, product_id: i64) -> ApiResult<()>;

    async fn schedules(&self) -> ApiResult<Vec<Schedule>>;
    async fn schedules_for_product(&self, product_id: i64) -> ApiResult<Vec<Schedule>>;
    async fn create_schedule(&self, request: &ScheduleCreateRequest) -> ApiResult<Schedule>;
    async fn delete_schedule(&self, schedule_id: i64) -> ApiResult<()>;

    async fn journal_entries(&self, user_id: i64) -> ApiResult<Vec<JournalEntry>>;
    async fn create_journal_entry(
        &self,
        request: &JournalEntryCreateRequest,
    ) -> ApiResult<JournalEntry>;
    async fn delete_journal_entry(&self, entry_id: i64) -> ApiResult<()>;
    async fn upload_journal_photo(
        &self,
        entry_id: i64,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<JournalPhoto>;

    async fn submit_feedback(&self, request: &FeedbackCreateRequest) -> ApiResult<Review>;
}
