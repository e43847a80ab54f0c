//! Data models for the aggregation pipeline.
//!
//! This module defines the core data structures shared by every layer:
//! - [`Category`]: the closed set of news categories callers may request
//! - [`RawArticle`]: partially-shaped adapter output, pre-normalization
//! - [`Article`]: the canonical, adapter-independent article record
//! - [`ResponseEnvelope`]: the uniform response wrapper returned by the façade
//!
//! Serialized field names use camelCase (`publishedAt`, `urlToImage`,
//! `totalResults`) to stay wire-compatible with the JSON schema the
//! rendering collaborators already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed enumeration of news categories.
///
/// Every request and every article carries exactly one of these values.
/// Unknown category strings are rejected at the edge (CLI parsing or serde)
/// rather than flowing through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
    World,
    Politics,
}

impl Category {
    /// All categories, in a fixed order. Used by the fallback generator
    /// and by tests that need exhaustive coverage.
    pub const ALL: [Category; 9] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
        Category::World,
        Category::Politics,
    ];

    /// The lowercase wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
            Category::World => "world",
            Category::Politics => "politics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name of the outlet, feed, or site an article came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Human-readable source name, e.g. "BBC News" or "Hacker News".
    pub name: String,
}

/// A raw, partially-shaped article as produced by a source adapter.
///
/// Adapters guarantee `title` and `url` are non-empty before emitting an
/// item; everything else is optional and filled in by the normalizer.
/// Raw items never cross the normalizer boundary unshaped.
#[derive(Debug, Clone)]
pub struct RawArticle {
    /// Upstream-assigned identifier when the source has one (a discussion
    /// item id, a feed guid). Used for deterministic id derivation.
    pub upstream_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source_name: String,
    pub author: Option<String>,
    pub category: Category,
}

/// The canonical article record returned to callers.
///
/// Invariants: `title` and `url` are non-empty, every defaulted field has
/// been filled by the normalizer, and the record is never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Unique within a single response. Derived from source plus upstream
    /// id (or url) where available, synthesized otherwise. Synthesized ids
    /// are not stable across requests.
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    pub source: ArticleSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: Category,
}

/// The uniform response wrapper returned by every façade operation.
///
/// `total_results` counts the merged (and, for search, filtered) set before
/// any page slicing, so callers can render pagination controls. `articles`
/// is the sliced page, ordered recency-descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// `"ok"` for every envelope the façade returns. Upstream error
    /// payloads are converted to empty adapter results long before an
    /// envelope is built, so callers never branch on this in practice.
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub articles: Vec<Article>,
}

impl ResponseEnvelope {
    /// Build a well-formed "ok" envelope.
    pub fn ok(total_results: usize, articles: Vec<Article>) -> Self {
        Self {
            status: "ok".to_string(),
            total_results,
            articles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> Article {
        Article {
            id: "bbc-news-abc123".to_string(),
            title: "Test Article".to_string(),
            description: "A description".to_string(),
            content: Some("Some content".to_string()),
            url: "https://example.com/test".to_string(),
            image_url: Some("https://example.com/image.jpg".to_string()),
            published_at: Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap(),
            source: ArticleSource {
                name: "BBC News".to_string(),
            },
            author: Some("Jane Doe".to_string()),
            category: Category::World,
        }
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::Technology).unwrap(),
            "\"technology\""
        );
        let parsed: Category = serde_json::from_str("\"politics\"").unwrap();
        assert_eq!(parsed, Category::Politics);
    }

    #[test]
    fn test_category_display_matches_as_str() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    #[test]
    fn test_article_serializes_camel_case_wire_fields() {
        let json = serde_json::to_string(&sample_article()).unwrap();
        assert!(json.contains("\"urlToImage\""));
        assert!(json.contains("\"publishedAt\""));
        assert!(json.contains("\"category\":\"world\""));
        assert!(!json.contains("image_url"));
        assert!(!json.contains("published_at"));
    }

    #[test]
    fn test_article_omits_absent_optionals() {
        let mut article = sample_article();
        article.content = None;
        article.image_url = None;
        article.author = None;
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("content"));
        assert!(!json.contains("urlToImage"));
        assert!(!json.contains("author"));
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = ResponseEnvelope::ok(42, vec![sample_article()]);
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"totalResults\":42"));

        let parsed: ResponseEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_results, 42);
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0], sample_article());
    }
}
