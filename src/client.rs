//! The query façade.
//!
//! [`NewsClient`] is the single entry point rendering collaborators use.
//! It hides which adapters ran and whether fallback fired: every operation
//! returns a well-formed [`ResponseEnvelope`] and none of them can fail.
//! The infallibility is by type, not by catch-all: nothing below this
//! layer returns an error across its boundary.

use crate::aggregate::{self, Aggregator};
use crate::config::NewsConfig;
use crate::models::{Category, ResponseEnvelope};
use std::time::Duration;
use tracing::{info, instrument};

/// Outbound request timeout. The original design bounded latency only by
/// item counts; a clock-based bound belongs here since the adapter
/// boundary already treats any transport failure as zero items.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// The public news query client.
///
/// Construct once per process and share by reference; adapters hold no
/// per-request state and the underlying HTTP client pools connections.
#[derive(Debug, Clone)]
pub struct NewsClient {
    config: NewsConfig,
    aggregator: Aggregator,
}

impl NewsClient {
    /// Build a client from configuration.
    ///
    /// The only failure mode is HTTP client construction (TLS backend
    /// initialization); no network traffic happens here.
    pub fn new(config: NewsConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("worldnews/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let aggregator = Aggregator::new(http, &config);
        Ok(Self { config, aggregator })
    }

    /// Top headlines, optionally scoped to a category.
    #[instrument(level = "info", skip(self))]
    pub async fn top_headlines(&self, category: Option<Category>) -> ResponseEnvelope {
        let merged = self.aggregator.collect(category, None).await;
        let total = merged.len();
        let articles: Vec<_> = merged.into_iter().take(self.config.page_size).collect();
        info!(total, returned = articles.len(), "Built headlines envelope");
        ResponseEnvelope::ok(total, articles)
    }

    /// Free-text search with offset/limit pagination.
    ///
    /// `total_results` counts the filtered set, not the raw merge; the
    /// page slice is taken from the filtered set.
    #[instrument(level = "info", skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> ResponseEnvelope {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(self.config.page_size);

        let merged = self.aggregator.collect(None, Some(query)).await;
        let filtered = aggregate::filter_by_query(merged, query);
        let total = filtered.len();
        let articles = aggregate::paginate(filtered, page, page_size);
        info!(total, page, returned = articles.len(), "Built search envelope");
        ResponseEnvelope::ok(total, articles)
    }

    /// Category-scoped headlines. Alias of [`Self::top_headlines`] with a
    /// mandatory category.
    pub async fn by_category(&self, category: Category) -> ResponseEnvelope {
        self.top_headlines(Some(category)).await
    }
}
