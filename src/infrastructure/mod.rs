//! Infrastructure module - Transport and persistence
//!
//! HTTP client, failure classification, token persistence, configuration
//! and logging bootstrap, plus the HTTP implementations of the domain
//! gateway traits.

pub mod config;
pub mod gateways;
pub mod http_client;
pub mod logging;
pub mod token_store;

// Re-export commonly used items
pub use config::{ClientConfig, SEARCH_PAGE_SIZE};
pub use gateways::{HttpAuthGateway, HttpCareGateway, HttpProductGateway, HttpProfileGateway};
pub use http_client::{ApiClient, Envelope, RequestOptions};
pub use logging::{init_logging, LoggingConfig};
pub use token_store::TokenStore;
