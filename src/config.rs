//! Configuration for the aggregation pipeline.
//!
//! A [`NewsConfig`] is constructed once per process (typically from CLI
//! flags and environment variables) and handed to the façade by value.
//! Adapters are stateless after construction, so no process-wide mutable
//! state exists anywhere in the pipeline.
//!
//! Upstream base URLs are part of the configuration so tests can point an
//! adapter at an unroutable address and exercise the failure paths without
//! touching the network.

/// Placeholder credential value shipped in sample configs. Treated the
/// same as an absent key: the headline adapter will not attempt a network
/// call with it.
pub const API_KEY_SENTINEL: &str = "YOUR_API_KEY_HERE";

/// Default number of articles per response page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

const DEFAULT_HEADLINE_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_FEED_BRIDGE_URL: &str = "https://api.rss2json.com/v1/api.json";
const DEFAULT_DISCUSSION_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Process-wide configuration for the news pipeline.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Credential for the paid headline API. `None`, empty, or the
    /// [`API_KEY_SENTINEL`] value disables that adapter without error.
    pub api_key: Option<String>,
    /// Two-letter country code forwarded to the headline API.
    pub country: String,
    /// Page size applied when a caller does not specify one.
    pub page_size: usize,
    /// Base URL of the headline API, e.g. `https://newsapi.org/v2`.
    pub headline_base_url: String,
    /// Full URL of the RSS-to-JSON bridge endpoint.
    pub feed_bridge_url: String,
    /// Base URL of the discussion-site API.
    pub discussion_base_url: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            country: "us".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            headline_base_url: DEFAULT_HEADLINE_BASE_URL.to_string(),
            feed_bridge_url: DEFAULT_FEED_BRIDGE_URL.to_string(),
            discussion_base_url: DEFAULT_DISCUSSION_BASE_URL.to_string(),
        }
    }
}

impl NewsConfig {
    /// The usable headline API credential, if any.
    ///
    /// Filters out the absent, empty, and sentinel cases so callers get
    /// `Some` only when a real key was configured.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != API_KEY_SENTINEL)
    }
}
