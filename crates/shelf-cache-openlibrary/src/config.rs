//! Configuration for the Open Library client

use std::time::Duration;

/// Configuration for upstream connection and URL building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLibraryConfig {
    /// API base URL (e.g., "https://openlibrary.org")
    pub base_url: String,

    /// Covers service base URL used to build cover image links
    pub covers_base_url: String,

    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            covers_base_url: "https://covers.openlibrary.org".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("shelf-cache/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl OpenLibraryConfig {
    /// Create new config with API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set covers base URL
    pub fn covers_base_url(mut self, url: impl Into<String>) -> Self {
        self.covers_base_url = url.into();
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set User-Agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
