//! Product query coordination
//!
//! Owns the search state: debounced free-text queries, filter facets,
//! pagination with replace/append merges, offline tracking and a coarse
//! per-query retry policy layered above the transport's own retry loop.
//!
//! State machine: `Idle -> Loading -> {Loaded, Errored}`, with an
//! orthogonal `loading_more` flag for pagination appends and an
//! `is_offline` flag toggled independently of the main phase.
//!
//! Every logical query bumps a generation counter; an in-flight fetch
//! whose generation is stale by the time it completes is discarded rather
//! than applied, so the newest request wins instead of the last write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::messages;
use crate::domain::enrichment::EnrichmentTable;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::gateway::ProductGateway;
use crate::domain::product::{
    Ingredient, PageResult, ProductDetail, ProductSearchParams, ProductSummary, SearchFilters,
};
use crate::infrastructure::config::SEARCH_PAGE_SIZE;

/// Quiet window after the last keystroke before a query fetch fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Coordinator-level retries per logical query, on top of transport retries.
pub const MAX_QUERY_RETRIES: u32 = 3;

const MAX_QUERY_BACKOFF_MS: u64 = 10_000;

/// Main phase of the search state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// How a fetched page merges into the current product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeMode {
    /// Discard prior products (initial load, new search/filter, page jump).
    Replace,
    /// Concatenate onto the current list (load-more).
    Append,
}

/// Observable search state. Owned exclusively by the coordinator; views
/// receive snapshots.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub phase: SearchPhase,
    pub products: Vec<ProductSummary>,
    /// 0-based page of the last successful fetch.
    pub page: u32,
    pub total_pages: u32,
    pub loading_more: bool,
    pub error: Option<String>,
    pub is_offline: bool,
    pub retry_count: u32,
    pub query: String,
    pub filters: SearchFilters,
}

struct CoordinatorInner<G> {
    gateway: Arc<G>,
    enrichment: EnrichmentTable,
    state: RwLock<SearchState>,
    /// Logical query generation; stale completions are discarded.
    fetch_generation: AtomicU64,
    /// Keystroke generation for the trailing-edge debounce.
    debounce_generation: AtomicU64,
    /// Error scoped to detail lookups; never touches the search state.
    detail_error: RwLock<Option<String>>,
    shutdown: CancellationToken,
}

impl<G> Drop for CoordinatorInner<G> {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Coordinates paginated product search against a [`ProductGateway`].
pub struct ProductQueryCoordinator<G> {
    inner: Arc<CoordinatorInner<G>>,
}

impl<G> Clone for ProductQueryCoordinator<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: ProductGateway + 'static> ProductQueryCoordinator<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_enrichment(gateway, EnrichmentTable::default())
    }

    pub fn with_enrichment(gateway: Arc<G>, enrichment: EnrichmentTable) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                gateway,
                enrichment,
                state: RwLock::new(SearchState::default()),
                fetch_generation: AtomicU64::new(0),
                debounce_generation: AtomicU64::new(0),
                detail_error: RwLock::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Snapshot of the current search state.
    pub async fn state(&self) -> SearchState {
        self.inner.state.read().await.clone()
    }

    /// Error from the most recent detail lookup, if any.
    pub async fn detail_error(&self) -> Option<String> {
        self.inner.detail_error.read().await.clone()
    }

    /// Initial load of the first page.
    pub async fn start(&self) {
        self.fetch(0, MergeMode::Replace).await;
    }

    /// Record a query edit. Filters reset immediately; the fetch fires only
    /// after [`DEBOUNCE_WINDOW`] of inactivity (trailing edge), each edit
    /// restarting the timer.
    pub async fn set_query(&self, query: impl Into<String>) {
        {
            let mut state = self.inner.state.write().await;
            state.query = query.into();
            state.filters = SearchFilters::default();
        }

        let my_generation = self.inner.debounce_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let this = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(DEBOUNCE_WINDOW) => {}
                _ = this.inner.shutdown.cancelled() => return,
            }
            if this.inner.debounce_generation.load(Ordering::SeqCst) != my_generation {
                return; // superseded by a later keystroke
            }
            this.fetch(0, MergeMode::Replace).await;
        });
    }

    /// Replace the filter facet. The free-text query resets immediately
    /// (the two facets are mutually exclusive) and the fetch fires at once.
    pub async fn set_filters(&self, filters: SearchFilters) {
        // Invalidate any pending debounce
        self.inner.debounce_generation.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.inner.state.write().await;
            state.query = String::new();
            state.filters = filters;
        }
        self.fetch(0, MergeMode::Replace).await;
    }

    /// Fetch the next page in append mode. No-op while a load-more is in
    /// flight or when already on the last page.
    pub async fn load_more(&self) {
        let (busy, next_page, total_pages) = {
            let state = self.inner.state.read().await;
            (state.loading_more, state.page + 1, state.total_pages)
        };
        if busy || next_page >= total_pages {
            return;
        }
        self.fetch(next_page, MergeMode::Append).await;
    }

    /// Jump to a page in replace mode. No-op outside `[0, total_pages)` or
    /// when already on that page.
    pub async fn go_to_page(&self, page: u32) {
        let (current, total_pages) = {
            let state = self.inner.state.read().await;
            (state.page, state.total_pages)
        };
        if page >= total_pages || page == current {
            return;
        }
        self.fetch(page, MergeMode::Replace).await;
    }

    /// Manual retry of the last query/page, clearing the error state.
    pub async fn retry(&self) {
        let page = {
            let mut state = self.inner.state.write().await;
            state.error = None;
            state.retry_count = 0;
            state.page
        };
        self.fetch(page, MergeMode::Replace).await;
    }

    /// Mark the client offline. Existing products stay visible.
    pub async fn notify_offline(&self) {
        let mut state = self.inner.state.write().await;
        state.is_offline = true;
    }

    /// Mark the client online again. A transition out of the offline state
    /// retries the last-known query/page exactly once.
    pub async fn notify_online(&self) {
        let was_offline = {
            let mut state = self.inner.state.write().await;
            let was = state.is_offline;
            state.is_offline = false;
            was
        };
        if was_offline {
            self.retry().await;
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.inner.fetch_generation.load(Ordering::SeqCst) != generation
    }

    /// Run one logical fetch with the coordinator's coarse retry policy.
    async fn fetch(&self, page: u32, mode: MergeMode) {
        let generation = self.inner.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (query, filters) = {
            let mut state = self.inner.state.write().await;
            if mode == MergeMode::Append {
                state.loading_more = true;
            } else {
                state.phase = SearchPhase::Loading;
            }
            state.error = None;
            state.is_offline = false;
            (state.query.clone(), state.filters.clone())
        };

        let params = ProductSearchParams::new(
            (!query.is_empty()).then_some(query),
            page,
            SEARCH_PAGE_SIZE,
            &filters,
        );

        let mut attempt: u32 = 0;
        loop {
            if self.inner.shutdown.is_cancelled() {
                return;
            }

            let result = self.inner.gateway.search_products(&params).await;

            if self.is_stale(generation) {
                debug!("Discarding stale fetch result for page {}", page);
                return;
            }

            match result {
                Ok(page_result) => {
                    self.apply_page(mode, page_result).await;
                    return;
                }
                Err(err @ ApiError::InvalidInput { .. }) => {
                    warn!("Non-retryable input rejection, aborting retries: {}", err);
                    self.finish_errored(mode, messages::BAD_REQUEST, MAX_QUERY_RETRIES)
                        .await;
                    return;
                }
                Err(err @ ApiError::Client { .. }) => {
                    warn!("Client error, aborting retries: {}", err);
                    self.finish_errored(mode, messages::for_search_error(&err), MAX_QUERY_RETRIES)
                        .await;
                    return;
                }
                Err(err @ ApiError::NetworkUnavailable { .. }) => {
                    warn!("Connectivity lost during fetch: {}", err);
                    self.go_offline().await;
                    return;
                }
                Err(err) => {
                    if attempt >= MAX_QUERY_RETRIES {
                        self.finish_errored(mode, messages::RETRIES_EXHAUSTED, attempt).await;
                        return;
                    }
                    let backoff =
                        Duration::from_millis((1000u64 << attempt).min(MAX_QUERY_BACKOFF_MS));
                    {
                        let mut state = self.inner.state.write().await;
                        state.error = Some(messages::for_search_error(&err).to_string());
                        state.retry_count = attempt + 1;
                    }
                    warn!(
                        "🔄 Query retry {}/{} in {:?}: {}",
                        attempt + 1,
                        MAX_QUERY_RETRIES,
                        backoff,
                        err
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = self.inner.shutdown.cancelled() => return,
                    }
                    if self.is_stale(generation) {
                        return;
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn apply_page(&self, mode: MergeMode, page_result: PageResult<ProductSummary>) {
        let mut state = self.inner.state.write().await;
        match mode {
            MergeMode::Replace => state.products = page_result.content,
            MergeMode::Append => state.products.extend(page_result.content),
        }
        state.page = page_result.number;
        state.total_pages = page_result.total_pages;
        state.phase = SearchPhase::Loaded;
        state.loading_more = false;
        state.error = None;
        state.retry_count = 0;
        state.is_offline = false;
    }

    async fn finish_errored(&self, mode: MergeMode, message: &str, retry_count: u32) {
        let mut state = self.inner.state.write().await;
        state.error = Some(message.to_string());
        state.retry_count = retry_count;
        if mode != MergeMode::Append {
            state.products.clear();
        }
        state.phase = SearchPhase::Errored;
        state.loading_more = false;
    }

    async fn go_offline(&self) {
        let mut state = self.inner.state.write().await;
        state.is_offline = true;
        state.error = Some(messages::OFFLINE.to_string());
        // Products stay visible while offline
        state.phase = SearchPhase::Errored;
        state.loading_more = false;
    }

    /// Fetch a product detail and its feedback in parallel and join them.
    /// Failures are scoped: the shared search state is untouched, a detail
    /// error message is recorded and `None` returned.
    pub async fn fetch_product_details(&self, product_id: i64) -> Option<ProductDetail> {
        let gateway = &self.inner.gateway;
        let joined = futures::future::try_join(
            gateway.product_by_id(product_id),
            gateway.feedback_for_product(product_id),
        )
        .await;

        match joined {
            Ok((mut detail, reviews)) => {
                detail.reviews = reviews;
                self.inner.enrichment.apply(&mut detail);
                *self.inner.detail_error.write().await = None;
                Some(detail)
            }
            Err(err) => {
                warn!("Failed to fetch details for product {}: {}", product_id, err);
                *self.inner.detail_error.write().await =
                    Some(format!("{} {product_id}", messages::DETAIL_FAILED));
                None
            }
        }
    }

    /// Single ingredient lookup for the ingredient detail view.
    pub async fn fetch_ingredient(&self, ingredient_id: i64) -> ApiResult<Ingredient> {
        self.inner.gateway.ingredient_by_id(ingredient_id).await
    }

    /// Barcode lookup. Errors propagate so the caller can distinguish
    /// "not found" from a transport failure.
    pub async fn search_by_barcode(&self, barcode: &str) -> ApiResult<ProductDetail> {
        let mut detail = self.inner.gateway.product_by_barcode(barcode).await?;
        self.inner.enrichment.apply(&mut detail);
        Ok(detail)
    }

    /// Fetch both sides of a comparison in parallel; either failure fails
    /// the pair.
    pub async fn fetch_compare_pair(
        &self,
        first_id: i64,
        second_id: i64,
    ) -> ApiResult<(ProductDetail, ProductDetail)> {
        let gateway = &self.inner.gateway;
        let (mut a, mut b) = futures::future::try_join(
            gateway.product_by_id(first_id),
            gateway.product_by_id(second_id),
        )
        .await?;
        self.inner.enrichment.apply(&mut a);
        self.inner.enrichment.apply(&mut b);
        Ok((a, b))
    }
}
