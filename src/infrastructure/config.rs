//! Client configuration
//!
//! Everything the transport layer needs is passed at construction: base
//! URL, timeout, retry bound, identification headers. There is no global
//! configuration lookup; tests construct a config pointing at a fake or
//! local server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default REST base path of the catalog API.
pub const DEFAULT_BASE_URL: &str = "https://api.ladanv.id.vn/api/v1";

/// Fixed page size of the product search grid.
pub const SEARCH_PAGE_SIZE: u32 = 21;

/// Transport configuration for the API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL including the `/api/v1` prefix.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Extra attempts after the first failed one, for retryable failures.
    pub transport_retries: u32,

    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 15,
            transport_retries: 2,
            user_agent: "glowdex/0.2".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub mod auth {
        pub const LOGIN: &str = "/auth/signin";
        pub const REGISTER: &str = "/auth/signup";
        pub const ME: &str = "/auth/me";
    }

    pub mod user {
        pub const PROFILE: &str = "/profile";
        pub const SKIN_ANALYSIS: &str = "/profile/skin-analysis";
    }

    pub mod products {
        pub const BASE: &str = "/products";
        pub const BARCODE: &str = "/products/barcode";
    }

    pub mod ingredients {
        pub const BASE: &str = "/ingredients";
    }

    pub mod routines {
        pub const BASE: &str = "/routines";
    }

    pub mod schedules {
        pub const BASE: &str = "/schedules";
    }

    pub mod journal {
        pub const ENTRIES: &str = "/journal/entries";
    }

    pub mod feedback {
        pub const BASE: &str = "/feedback";
    }
}
