//! Glowdex - Client data layer for a skincare catalog and personal-care
//! assistant
//!
//! Talks to the remote catalog REST API and owns the client-side state:
//! debounced paginated product search, failure classification with two
//! layered retry policies, offline tracking, profile management with
//! optimistic updates, a pure recommendation scorer and the comparison
//! selection.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the main entry points for easier access
pub use application::{AuthManager, CareService, ProductQueryCoordinator, ProfileManager};
pub use domain::{
    rank_products, ApiError, ComparisonSet, EnrichmentTable, ProductDetail, ProductSummary,
    SearchFilters, SkinType, ToggleOutcome, UserProfile,
};
pub use infrastructure::{ApiClient, ClientConfig, TokenStore};
