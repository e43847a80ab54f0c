//! Discussion-site adapter (Hacker News-shaped upstream).
//!
//! Two-phase fetch: the ranked top-stories id list first, then each of the
//! first [`STORY_PREFIX`] items by id, concurrently. Per-item failures are
//! logged and discarded; the adapter succeeds with whatever settled. Items
//! without a title or an outbound link (self posts) are dropped, and every
//! surviving item is tagged [`Category::Technology`], the only category
//! this upstream meaningfully covers.

use super::{BoxError, SourceResult};
use crate::config::NewsConfig;
use crate::models::{Category, RawArticle};
use crate::normalize::strip_html;
use chrono::DateTime;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::{instrument, warn};

/// How many ids from the ranked list are fetched per call.
pub const STORY_PREFIX: usize = 10;

const SOURCE_NAME: &str = "Hacker News";

#[derive(Debug, Deserialize)]
struct StoryItem {
    id: Option<u64>,
    title: Option<String>,
    url: Option<String>,
    text: Option<String>,
    /// Unix seconds.
    time: Option<i64>,
    by: Option<String>,
}

/// Adapter for the ranked discussion site.
#[derive(Debug, Clone)]
pub struct DiscussionApi {
    http: reqwest::Client,
    base_url: String,
}

impl DiscussionApi {
    pub fn new(http: reqwest::Client, config: &NewsConfig) -> Self {
        Self {
            http,
            base_url: config.discussion_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the current top stories.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self) -> SourceResult {
        match self.request().await {
            Ok(items) => SourceResult::Fetched(items),
            Err(e) => SourceResult::Failed(e.to_string()),
        }
    }

    async fn request(&self) -> Result<Vec<RawArticle>, BoxError> {
        let ids: Vec<u64> = self
            .http
            .get(format!("{}/topstories.json", self.base_url))
            .send()
            .await?
            .json()
            .await?;

        // All item fetches must settle before the adapter proceeds; a
        // failed item is a skipped item, not a failed adapter.
        let items: Vec<RawArticle> = stream::iter(ids.into_iter().take(STORY_PREFIX))
            .map(|id| self.fetch_item(id))
            .buffer_unordered(STORY_PREFIX)
            .filter_map(|item| async move { item })
            .collect()
            .await;

        Ok(items)
    }

    async fn fetch_item(&self, id: u64) -> Option<RawArticle> {
        match self.item(id).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(id, error = %e, "Discussion item fetch failed; skipping");
                None
            }
        }
    }

    async fn item(&self, id: u64) -> Result<Option<RawArticle>, BoxError> {
        let item: StoryItem = self
            .http
            .get(format!("{}/item/{id}.json", self.base_url))
            .send()
            .await?
            .json()
            .await?;
        Ok(story_to_raw(item))
    }
}

/// Convert one story, excluding items without a title or outbound link.
fn story_to_raw(item: StoryItem) -> Option<RawArticle> {
    let title = item.title.filter(|t| !t.trim().is_empty())?;
    let url = item.url.filter(|u| !u.trim().is_empty())?;

    let text = item
        .text
        .map(|t| strip_html(&t))
        .filter(|t| !t.is_empty());
    let published_at = item
        .time
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    Some(RawArticle {
        upstream_id: item.id.map(|id| id.to_string()),
        title,
        description: text.clone(),
        content: text,
        url,
        image_url: None,
        published_at,
        source_name: SOURCE_NAME.to_string(),
        author: item.by,
        category: Category::Technology,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_to_raw_maps_fields() {
        let body = r#"{
            "id": 43210987,
            "title": "A new systems language",
            "url": "https://example.com/lang",
            "time": 1746525600,
            "by": "pg",
            "type": "story",
            "score": 312
        }"#;
        let item: StoryItem = serde_json::from_str(body).unwrap();
        let raw = story_to_raw(item).unwrap();
        assert_eq!(raw.upstream_id.as_deref(), Some("43210987"));
        assert_eq!(raw.title, "A new systems language");
        assert_eq!(raw.category, Category::Technology);
        assert_eq!(raw.author.as_deref(), Some("pg"));
        assert_eq!(
            raw.published_at.unwrap().to_rfc3339(),
            "2025-05-06T10:00:00+00:00"
        );
    }

    #[test]
    fn test_story_to_raw_drops_self_posts() {
        // Self posts carry text but no outbound link.
        let body = r#"{
            "id": 1,
            "title": "Ask: how do you test adapters?",
            "text": "No link here.",
            "time": 1746525600,
            "by": "someone"
        }"#;
        let item: StoryItem = serde_json::from_str(body).unwrap();
        assert!(story_to_raw(item).is_none());
    }

    #[test]
    fn test_story_to_raw_strips_markup_from_text() {
        let body = r#"{
            "id": 2,
            "title": "Show: a tiny parser",
            "url": "https://example.com/parser",
            "text": "Built with <i>zero</i> dependencies.&#x27;",
            "time": 1746525600
        }"#;
        let item: StoryItem = serde_json::from_str(body).unwrap();
        let raw = story_to_raw(item).unwrap();
        assert!(!raw.description.as_deref().unwrap().contains('<'));
    }
}
