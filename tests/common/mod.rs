//! Hand-rolled fake gateways and fixture builders shared by the
//! integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use glowdex::domain::auth::{AuthCredentials, AuthUser, LoginResponse};
use glowdex::domain::error::{ApiError, ApiResult};
use glowdex::domain::gateway::{AuthGateway, ProductGateway, ProfileGateway};
use glowdex::domain::care::SkinAnalysisResult;
use glowdex::domain::product::{
    Ingredient, PageResult, ProductDetail, ProductSearchParams, ProductSummary, Review,
};
use glowdex::domain::profile::{SkinType, UserProfile, UserProfileUpdate};

pub fn summary(id: i64) -> ProductSummary {
    ProductSummary {
        id,
        name: format!("product-{id}"),
        upc_ean: None,
        category: None,
        image_url: None,
        country: None,
        brand_id: None,
        brand_name: None,
        created_at: None,
    }
}

pub fn page(number: u32, total_pages: u32, ids: &[i64]) -> PageResult<ProductSummary> {
    PageResult {
        content: ids.iter().copied().map(summary).collect(),
        total_pages,
        total_elements: (total_pages as u64) * (ids.len() as u64),
        size: ids.len() as u32,
        number,
        first: number == 0,
        last: number + 1 >= total_pages,
        empty: ids.is_empty(),
    }
}

pub fn ingredient(id: i64, inci_name: &str) -> Ingredient {
    Ingredient {
        id,
        inci_name: inci_name.into(),
        alias_vi: None,
        description_vi: None,
        functions: None,
        risk_level: None,
        banned_in: None,
        typical_range: None,
        sources: None,
        solves: None,
        notes: None,
    }
}

pub fn detail(id: i64, ingredients: Vec<Ingredient>) -> ProductDetail {
    let mut detail = ProductDetail::from_summary(summary(id));
    detail.ingredients = ingredients;
    detail
}

pub fn review(id: i64, product_id: i64, rating: u8) -> Review {
    Review {
        id,
        user_id: 1,
        product_id,
        rating,
        comment: None,
        status: None,
        created_at: None,
    }
}

pub fn profile(user_id: i64) -> UserProfile {
    UserProfile {
        user_id,
        skin_type: SkinType::Normal,
        concerns: vec![],
        allergies: vec![],
        pregnant: false,
        goals: vec![],
    }
}

pub fn server_transient() -> ApiError {
    ApiError::ServerTransient {
        status: 500,
        message: "upstream exploded".into(),
    }
}

pub fn invalid_input() -> ApiError {
    ApiError::InvalidInput {
        message: "Failed to convert value of type 'java.lang.String' to required type 'java.lang.Long'".into(),
    }
}

pub fn not_found() -> ApiError {
    ApiError::Client {
        status: 404,
        message: "not found".into(),
    }
}

pub struct RecordedSearch {
    pub params: ProductSearchParams,
    pub at: Instant,
}

/// Scripted product gateway. Search outcomes pop from a queue; an empty
/// queue serves a deterministic page derived from the requested number.
pub struct FakeProductGateway {
    pub search_script: Mutex<VecDeque<ApiResult<PageResult<ProductSummary>>>>,
    pub searches: Mutex<Vec<RecordedSearch>>,
    pub details: Mutex<HashMap<i64, ApiResult<ProductDetail>>>,
    pub feedback: Mutex<HashMap<i64, ApiResult<Vec<Review>>>>,
    pub barcodes: Mutex<HashMap<String, ApiResult<ProductDetail>>>,
    pub default_total_pages: u32,
}

impl FakeProductGateway {
    pub fn new(default_total_pages: u32) -> Self {
        Self {
            search_script: Mutex::new(VecDeque::new()),
            searches: Mutex::new(Vec::new()),
            details: Mutex::new(HashMap::new()),
            feedback: Mutex::new(HashMap::new()),
            barcodes: Mutex::new(HashMap::new()),
            default_total_pages,
        }
    }

    pub fn script_search(&self, outcome: ApiResult<PageResult<ProductSummary>>) {
        self.search_script.lock().unwrap().push_back(outcome);
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    pub fn search_params(&self) -> Vec<ProductSearchParams> {
        self.searches
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.params.clone())
            .collect()
    }

    pub fn search_times(&self) -> Vec<Instant> {
        self.searches.lock().unwrap().iter().map(|call| call.at).collect()
    }
}

#[async_trait]
impl ProductGateway for FakeProductGateway {
    async fn search_products(
        &self,
        params: &ProductSearchParams,
    ) -> ApiResult<PageResult<ProductSummary>> {
        self.searches.lock().unwrap().push(RecordedSearch {
            params: params.clone(),
            at: Instant::now(),
        });
        if let Some(outcome) = self.search_script.lock().unwrap().pop_front() {
            return outcome;
        }
        let base = (params.page as i64) * 10;
        Ok(page(
            params.page,
            self.default_total_pages,
            &[base + 1, base + 2],
        ))
    }

    async fn product_by_id(&self, product_id: i64) -> ApiResult<ProductDetail> {
        self.details
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn product_by_barcode(&self, barcode: &str) -> ApiResult<ProductDetail> {
        self.barcodes
            .lock()
            .unwrap()
            .get(barcode)
            .cloned()
            .unwrap_or_else(|| Err(not_found()))
    }

    async fn feedback_for_product(&self, product_id: i64) -> ApiResult<Vec<Review>> {
        self.feedback
            .lock()
            .unwrap()
            .get(&product_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn ingredient_by_id(&self, _ingredient_id: i64) -> ApiResult<Ingredient> {
        Err(not_found())
    }
}

/// Scripted profile gateway.
pub struct FakeProfileGateway {
    pub get_script: Mutex<VecDeque<ApiResult<UserProfile>>>,
    pub update_script: Mutex<VecDeque<ApiResult<UserProfile>>>,
    pub get_calls: AtomicU32,
    pub update_calls: AtomicU32,
}

impl FakeProfileGateway {
    pub fn new() -> Self {
        Self {
            get_script: Mutex::new(VecDeque::new()),
            update_script: Mutex::new(VecDeque::new()),
            get_calls: AtomicU32::new(0),
            update_calls: AtomicU32::new(0),
        }
    }

    pub fn script_get(&self, outcome: ApiResult<UserProfile>) {
        self.get_script.lock().unwrap().push_back(outcome);
    }

    pub fn script_update(&self, outcome: ApiResult<UserProfile>) {
        self.update_script.lock().unwrap().push_back(outcome);
    }
}

#[async_trait]
impl ProfileGateway for FakeProfileGateway {
    async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.get_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(profile(1)))
    }

    async fn update_profile(&self, _update: &UserProfileUpdate) -> ApiResult<UserProfile> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.update_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(profile(1)))
    }

    async fn analyze_skin_image(
        &self,
        _image: Vec<u8>,
        _file_name: &str,
    ) -> ApiResult<SkinAnalysisResult> {
        Err(ApiError::Client {
            status: 501,
            message: "not scripted".into(),
        })
    }
}

/// Scripted auth gateway.
pub struct FakeAuthGateway {
    pub login_script: Mutex<VecDeque<ApiResult<LoginResponse>>>,
    pub me_script: Mutex<VecDeque<ApiResult<AuthUser>>>,
}

impl FakeAuthGateway {
    pub fn new() -> Self {
        Self {
            login_script: Mutex::new(VecDeque::new()),
            me_script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn user(id: i64) -> AuthUser {
        AuthUser {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            roles: vec!["USER".into()],
        }
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn login(&self, _credentials: &AuthCredentials) -> ApiResult<LoginResponse> {
        self.login_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(LoginResponse {
                    access_token: "access.token.sig".into(),
                    refresh_token: "refresh".into(),
                    user: Self::user(1),
                })
            })
    }

    async fn signup(&self, _credentials: &AuthCredentials) -> ApiResult<()> {
        Ok(())
    }

    async fn me(&self) -> ApiResult<AuthUser> {
        self.me_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::user(1)))
    }
}
