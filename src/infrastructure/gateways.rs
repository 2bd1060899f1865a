//! HTTP implementations of the domain gateway traits
//!
//! Thin typed adapters over [`ApiClient`]: endpoint paths, query-string
//! mapping and required-data checks. Policy (retry, debounce, merge) lives
//! in the application layer.

use async_trait::async_trait;
use url::form_urlencoded;

use crate::domain::auth::{AuthCredentials, AuthUser, LoginResponse};
use crate::domain::care::{
    FeedbackCreateRequest, JournalEntry, JournalEntryCreateRequest, JournalPhoto, Routine,
    RoutineCreateRequest, RoutineItem, Schedule, ScheduleCreateRequest, SkinAnalysisResult,
};
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::gateway::{AuthGateway, CareGateway, ProductGateway, ProfileGateway};
use crate::domain::product::{
    Ingredient, PageResult, ProductDetail, ProductSearchParams, ProductSummary, Review,
};
use crate::domain::profile::{UserProfile, UserProfileUpdate};
use crate::infrastructure::config::endpoints;
use crate::infrastructure::http_client::{ApiClient, RequestOptions};

fn require<T>(data: Option<T>, what: &str) -> ApiResult<T> {
    data.ok_or_else(|| ApiError::malformed(format!("response data for {what} is empty")))
}

/// Build the product search query string from fixed parameter mapping.
fn search_query(params: &ProductSearchParams) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("page", &params.page.to_string());
    query.append_pair("size", &params.size.to_string());
    query.append_pair("sort", &params.sort);
    if let Some(text) = &params.query {
        query.append_pair("query", text);
    }
    if let Some(skin_type) = params.skin_type {
        query.append_pair("skinType", skin_type.as_str());
    }
    if !params.concerns.is_empty() {
        query.append_pair("concerns", &params.concerns.join(","));
    }
    query.finish()
}

/// Product catalog over HTTP.
#[derive(Clone)]
pub struct HttpProductGateway {
    client: ApiClient,
}

impl HttpProductGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductGateway for HttpProductGateway {
    async fn search_products(
        &self,
        params: &ProductSearchParams,
    ) -> ApiResult<PageResult<ProductSummary>> {
        let path = format!("{}?{}", endpoints::products::BASE, search_query(params));
        require(self.client.get(&path).await?, "product search")
    }

    async fn product_by_id(&self, product_id: i64) -> ApiResult<ProductDetail> {
        let path = format!("{}/{product_id}", endpoints::products::BASE);
        require(
            self.client.get(&path).await?,
            &format!("product {product_id}"),
        )
    }

    async fn product_by_barcode(&self, barcode: &str) -> ApiResult<ProductDetail> {
        let path = format!("{}/{barcode}", endpoints::products::BARCODE);
        require(self.client.get(&path).await?, &format!("barcode {barcode}"))
    }

    async fn feedback_for_product(&self, product_id: i64) -> ApiResult<Vec<Review>> {
        let path = format!("{}/product/{product_id}", endpoints::feedback::BASE);
        Ok(self.client.get(&path).await?.unwrap_or_default())
    }

    async fn ingredient_by_id(&self, ingredient_id: i64) -> ApiResult<Ingredient> {
        let path = format!("{}/{ingredient_id}", endpoints::ingredients::BASE);
        require(
            self.client.get(&path).await?,
            &format!("ingredient {ingredient_id}"),
        )
    }
}

/// Profile endpoints over HTTP.
#[derive(Clone)]
pub struct HttpProfileGateway {
    client: ApiClient,
}

impl HttpProfileGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn get_profile(&self) -> ApiResult<UserProfile> {
        require(self.client.get(endpoints::user::PROFILE).await?, "profile")
    }

    async fn update_profile(&self, update: &UserProfileUpdate) -> ApiResult<UserProfile> {
        require(
            self.client.put(endpoints::user::PROFILE, update).await?,
            "profile update",
        )
    }

    async fn analyze_skin_image(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<SkinAnalysisResult> {
        require(
            self.client
                .post_multipart(endpoints::user::SKIN_ANALYSIS, "file", image, file_name)
                .await?,
            "skin analysis",
        )
    }
}

/// Auth endpoints over HTTP. Sign-in and sign-up are public routes.
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &AuthCredentials) -> ApiResult<LoginResponse> {
        require(
            self.client
                .post(endpoints::auth::LOGIN, credentials, RequestOptions::public())
                .await?,
            "login",
        )
    }

    async fn signup(&self, credentials: &AuthCredentials) -> ApiResult<()> {
        self.client
            .post::<serde_json::Value, _>(
                endpoints::auth::REGISTER,
                credentials,
                RequestOptions::public(),
            )
            .await?;
        Ok(())
    }

    async fn me(&self) -> ApiResult<AuthUser> {
        require(self.client.get(endpoints::auth::ME).await?, "current user")
    }
}

/// Care-assistant endpoints over HTTP.
#[derive(Clone)]
pub struct HttpCareGateway {
    client: ApiClient,
}

impl HttpCareGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CareGateway for HttpCareGateway {
    async fn routines(&self) -> ApiResult<Vec<Routine>> {
        Ok(self
            .client
            .get(endpoints::routines::BASE)
            .await?
            .unwrap_or_default())
    }

    async fn routine_by_id(&self, routine_id: i64) -> ApiResult<Routine> {
        let path = format!("{}/{routine_id}", endpoints::routines::BASE);
        require(self.client.get(&path).await?, &format!("routine {routine_id}"))
    }

    async fn create_routine(&self, request: &RoutineCreateRequest) -> ApiResult<Routine> {
        require(
            self.client
                .post(endpoints::routines::BASE, request, RequestOptions::default())
                .await?,
            "created routine",
        )
    }

    async fn delete_routine(&self, routine_id: i64) -> ApiResult<()> {
        let path = format!("{}/{routine_id}", endpoints::routines::BASE);
        self.client.delete(&path).await
    }

    async fn add_routine_item(&self, routine_id: i64, item: &RoutineItem) -> ApiResult<Routine> {
        let path = format!("{}/{routine_id}/items", endpoints::routines::BASE);
        require(
            self.client
                .post(&path, item, RequestOptions::default())
                .await?,
            "updated routine",
        )
    }

    async fn remove_routine_item(&self, routine_id: i64, product_id: i64) -> ApiResult<()> {
        let path = format!("{}/{routine_id}/items/{product_id}", endpoints::routines::BASE);
        self.client.delete(&path).await
    }

    async fn schedules(&self) -> ApiResult<Vec<Schedule>> {
        Ok(self
            .client
            .get(endpoints::schedules::BASE)
            .await?
            .unwrap_or_default())
    }

    async fn schedules_for_product(&self, product_id: i64) -> ApiResult<Vec<Schedule>> {
        let path = format!("{}/product/{product_id}", endpoints::schedules::BASE);
        Ok(self.client.get(&path).await?.unwrap_or_default())
    }

    async fn create_schedule(&self, request: &ScheduleCreateRequest) -> ApiResult<Schedule> {
        require(
            self.client
                .post(endpoints::schedules::BASE, request, RequestOptions::default())
                .await?,
            "created schedule",
        )
    }

    async fn delete_schedule(&self, schedule_id: i64) -> ApiResult<()> {
        let path = format!("{}/{schedule_id}", endpoints::schedules::BASE);
        self.client.delete(&path).await
    }

    async fn journal_entries(&self, user_id: i64) -> ApiResult<Vec<JournalEntry>> {
        let path = format!("{}/user/{user_id}", endpoints::journal::ENTRIES);
        Ok(self.client.get(&path).await?.unwrap_or_default())
    }

    async fn create_journal_entry(
        &self,
        request: &JournalEntryCreateRequest,
    ) -> ApiResult<JournalEntry> {
        require(
            self.client
                .post(endpoints::journal::ENTRIES, request, RequestOptions::default())
                .await?,
            "created journal entry",
        )
    }

    async fn delete_journal_entry(&self, entry_id: i64) -> ApiResult<()> {
        let path = format!("{}/{entry_id}", endpoints::journal::ENTRIES);
        self.client.delete(&path).await
    }

    async fn upload_journal_photo(
        &self,
        entry_id: i64,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<JournalPhoto> {
        let path = format!("{}/{entry_id}/photos", endpoints::journal::ENTRIES);
        require(
            self.client
                .post_multipart(&path, "file", image, file_name)
                .await?,
            "uploaded photo",
        )
    }

    async fn submit_feedback(&self, request: &FeedbackCreateRequest) -> ApiResult<Review> {
        require(
            self.client
                .post(endpoints::feedback::BASE, request, RequestOptions::default())
                .await?,
            "submitted feedback",
        )
    }
}
