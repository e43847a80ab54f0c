//! Paid headline API adapter (NewsAPI-shaped upstream).
//!
//! Builds category or free-text queries against a remote headline endpoint
//! using an access credential. When no usable credential is configured the
//! adapter reports [`SourceResult::Unavailable`] immediately and never
//! dials out, which is what lets the rest of the pipeline (and ultimately
//! the fallback generator) carry a keyless deployment.
//!
//! # Upstream contract
//!
//! Query-string parameters `apiKey`, `country`, `category`, `page`,
//! `pageSize` (plus `q` for free-text search); JSON body with `status`,
//! `totalResults`, `articles[]`. An upstream body with `status == "error"`
//! is converted to zero items, never surfaced.

use super::{BoxError, SourceResult};
use crate::config::NewsConfig;
use crate::models::{Category, RawArticle};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct HeadlineResponse {
    status: String,
    #[serde(rename = "totalResults")]
    #[allow(dead_code)]
    total_results: Option<u32>,
    articles: Option<Vec<HeadlineArticle>>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeadlineArticle {
    source: HeadlineSource,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeadlineSource {
    name: Option<String>,
}

/// Adapter for the credential-gated headline API.
#[derive(Debug, Clone)]
pub struct HeadlineApi {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    country: String,
    page_size: usize,
}

impl HeadlineApi {
    pub fn new(http: reqwest::Client, config: &NewsConfig) -> Self {
        Self {
            http,
            base_url: config.headline_base_url.clone(),
            api_key: config.credential().map(str::to_string),
            country: config.country.clone(),
            page_size: config.page_size,
        }
    }

    /// Fetch headlines for a category, or search results for a query.
    ///
    /// Returns [`SourceResult::Unavailable`] without any network traffic
    /// when the credential is absent.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, category: Option<Category>, query: Option<&str>) -> SourceResult {
        let Some(key) = self.api_key.as_deref() else {
            return SourceResult::Unavailable;
        };
        match self.request(key, category, query).await {
            Ok(items) => SourceResult::Fetched(items),
            Err(e) => SourceResult::Failed(e.to_string()),
        }
    }

    async fn request(
        &self,
        key: &str,
        category: Option<Category>,
        query: Option<&str>,
    ) -> Result<Vec<RawArticle>, BoxError> {
        let page_size = self.page_size.to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("apiKey", key.to_string()),
            ("page", "1".to_string()),
            ("pageSize", page_size),
        ];

        // Free-text queries go to the search endpoint; everything else is
        // a country-scoped top-headlines request. The upstream treats an
        // explicit "general" the same as no category, so it is omitted.
        let endpoint = if let Some(q) = query {
            params.push(("q", q.to_string()));
            params.push(("language", "en".to_string()));
            params.push(("sortBy", "publishedAt".to_string()));
            "everything"
        } else {
            params.push(("country", self.country.clone()));
            if let Some(c) = category.filter(|c| *c != Category::General) {
                params.push(("category", c.as_str().to_string()));
            }
            "top-headlines"
        };

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        let response: HeadlineResponse = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .json()
            .await?;

        Ok(shape_response(response, category.unwrap_or(Category::General)))
    }
}

/// Map a parsed upstream body into raw articles, dropping unusable items.
///
/// An upstream-reported error payload is the zero-items case for this
/// adapter, logged and swallowed here.
fn shape_response(response: HeadlineResponse, category: Category) -> Vec<RawArticle> {
    if response.status != "ok" {
        warn!(
            code = response.code.as_deref().unwrap_or("unknown"),
            message = response.message.as_deref().unwrap_or(""),
            "Headline API reported an error payload; treating as zero items"
        );
        return Vec::new();
    }

    let items: Vec<RawArticle> = response
        .articles
        .unwrap_or_default()
        .into_iter()
        .filter_map(|article| article_to_raw(article, category))
        .collect();
    debug!(count = items.len(), "Shaped headline API articles");
    items
}

/// Convert one upstream article, excluding items without a title or link.
fn article_to_raw(article: HeadlineArticle, category: Category) -> Option<RawArticle> {
    let title = article.title.filter(|t| !t.trim().is_empty())?;
    let url = article.url.filter(|u| !u.trim().is_empty())?;
    let published_at = article
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Some(RawArticle {
        upstream_id: None,
        title,
        description: article.description,
        content: article.content,
        url,
        image_url: article.url_to_image,
        published_at,
        source_name: article
            .source
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Headline API".to_string()),
        author: article.author,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "Reuters"},
                "author": "Jane Doe",
                "title": "Markets rally on rate news",
                "description": "Stocks climbed broadly.",
                "url": "https://example.com/markets-rally",
                "urlToImage": "https://example.com/rally.jpg",
                "publishedAt": "2025-05-06T10:00:00Z",
                "content": "Full story text."
            },
            {
                "source": {"id": null, "name": "Reuters"},
                "author": null,
                "title": null,
                "description": "An item with no title is dropped.",
                "url": "https://example.com/no-title",
                "urlToImage": null,
                "publishedAt": "2025-05-06T09:00:00Z",
                "content": null
            }
        ]
    }"#;

    #[test]
    fn test_shape_response_drops_title_less_items() {
        let response: HeadlineResponse = serde_json::from_str(BODY).unwrap();
        let items = shape_response(response, Category::Business);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title, "Markets rally on rate news");
        assert_eq!(item.source_name, "Reuters");
        assert_eq!(item.category, Category::Business);
        assert_eq!(
            item.published_at.unwrap().to_rfc3339(),
            "2025-05-06T10:00:00+00:00"
        );
    }

    #[test]
    fn test_shape_response_error_payload_is_zero_items() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"bad key"}"#;
        let response: HeadlineResponse = serde_json::from_str(body).unwrap();
        assert!(shape_response(response, Category::General).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_without_credential_is_unavailable_offline() {
        // Base URL is unroutable; Unavailable must be reported before any
        // network attempt, so this cannot fail even offline.
        let config = NewsConfig {
            api_key: Some(crate::config::API_KEY_SENTINEL.to_string()),
            headline_base_url: "http://127.0.0.1:1".to_string(),
            ..NewsConfig::default()
        };
        let adapter = HeadlineApi::new(reqwest::Client::new(), &config);
        let result = adapter.fetch(None, None).await;
        assert!(matches!(result, SourceResult::Unavailable));
    }
}
