//! RSS feed adapter, via an RSS-to-JSON bridge.
//!
//! Each category maps to a small fixed set of outlet feeds. A call picks
//! one feed at random and asks the bridge (`?rss_url=<feed>`) to convert
//! it to JSON, so only a single upstream round trip is spent per request.
//! Item count is bounded to the first [`MAX_ITEMS_PER_FEED`] entries.
//!
//! Feed descriptions frequently embed markup; it is stripped before the
//! text enters the raw article so nothing downstream ever sees HTML.

use super::{BoxError, SourceResult};
use crate::config::NewsConfig;
use crate::models::{Category, RawArticle};
use crate::normalize::strip_html;
use chrono::{DateTime, NaiveDateTime, Utc};
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Items consumed from a single feed per call.
pub const MAX_ITEMS_PER_FEED: usize = 10;

/// A curated outlet feed.
#[derive(Debug, Clone, Copy)]
pub struct Feed {
    pub name: &'static str,
    pub url: &'static str,
}

static GENERAL_FEEDS: &[Feed] = &[
    Feed { name: "BBC News", url: "https://feeds.bbci.co.uk/news/rss.xml" },
    Feed { name: "NPR News", url: "https://feeds.npr.org/1001/rss.xml" },
    Feed { name: "CBS News", url: "https://www.cbsnews.com/latest/rss/main" },
];
static BUSINESS_FEEDS: &[Feed] = &[
    Feed {
        name: "CNBC Top News",
        url: "https://search.cnbc.com/rs/search/combinedcms/view.xml?partnerId=wrss01&id=100003114",
    },
    Feed { name: "BBC Business", url: "https://feeds.bbci.co.uk/news/business/rss.xml" },
];
static ENTERTAINMENT_FEEDS: &[Feed] = &[
    Feed {
        name: "BBC Entertainment",
        url: "https://feeds.bbci.co.uk/news/entertainment_and_arts/rss.xml",
    },
    Feed { name: "Variety", url: "https://variety.com/feed/" },
];
static HEALTH_FEEDS: &[Feed] = &[
    Feed { name: "BBC Health", url: "https://feeds.bbci.co.uk/news/health/rss.xml" },
    Feed { name: "NPR Health", url: "https://feeds.npr.org/1128/rss.xml" },
];
static SCIENCE_FEEDS: &[Feed] = &[
    Feed { name: "NPR Science", url: "https://feeds.npr.org/1007/rss.xml" },
    Feed {
        name: "BBC Science",
        url: "https://feeds.bbci.co.uk/news/science_and_environment/rss.xml",
    },
];
static SPORTS_FEEDS: &[Feed] = &[
    Feed { name: "BBC Sport", url: "https://feeds.bbci.co.uk/sport/rss.xml" },
    Feed { name: "ESPN", url: "https://www.espn.com/espn/rss/news" },
];
static TECHNOLOGY_FEEDS: &[Feed] = &[
    Feed { name: "BBC Technology", url: "https://feeds.bbci.co.uk/news/technology/rss.xml" },
    Feed { name: "MIT Technology Review", url: "https://www.technologyreview.com/feed/" },
];
static WORLD_FEEDS: &[Feed] = &[
    Feed { name: "BBC World", url: "https://feeds.bbci.co.uk/news/world/rss.xml" },
    Feed { name: "Guardian World", url: "https://www.theguardian.com/world/rss" },
];
static POLITICS_FEEDS: &[Feed] = &[
    Feed { name: "Politico", url: "https://www.politico.com/rss/politicopicks.xml" },
    Feed { name: "The Hill", url: "https://thehill.com/feed/" },
    Feed { name: "NPR Politics", url: "https://feeds.npr.org/1014/rss.xml" },
];

/// The per-category feed table. Every category has at least one feed, so
/// the feed adapter participates in every categorized request.
pub fn feeds_for(category: Category) -> &'static [Feed] {
    match category {
        Category::General => GENERAL_FEEDS,
        Category::Business => BUSINESS_FEEDS,
        Category::Entertainment => ENTERTAINMENT_FEEDS,
        Category::Health => HEALTH_FEEDS,
        Category::Science => SCIENCE_FEEDS,
        Category::Sports => SPORTS_FEEDS,
        Category::Technology => TECHNOLOGY_FEEDS,
        Category::World => WORLD_FEEDS,
        Category::Politics => POLITICS_FEEDS,
    }
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    status: String,
    items: Option<Vec<BridgeItem>>,
}

#[derive(Debug, Deserialize)]
struct BridgeItem {
    guid: Option<String>,
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    content: Option<String>,
    thumbnail: Option<String>,
    enclosure: Option<BridgeEnclosure>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BridgeEnclosure {
    link: Option<String>,
}

/// Adapter for the feed bridge.
#[derive(Debug, Clone)]
pub struct FeedBridge {
    http: reqwest::Client,
    bridge_url: String,
}

impl FeedBridge {
    pub fn new(http: reqwest::Client, config: &NewsConfig) -> Self {
        Self {
            http,
            bridge_url: config.feed_bridge_url.clone(),
        }
    }

    /// Fetch up to [`MAX_ITEMS_PER_FEED`] items from one randomly chosen
    /// feed of the category's table.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, category: Category) -> SourceResult {
        let feeds = feeds_for(category);
        let Some(chosen) = feeds.choose(&mut rand::rng()) else {
            return SourceResult::Unavailable;
        };
        debug!(feed = chosen.name, url = chosen.url, "Selected feed");
        match self.request(chosen, category).await {
            Ok(items) => SourceResult::Fetched(items),
            Err(e) => SourceResult::Failed(e.to_string()),
        }
    }

    async fn request(&self, feed: &Feed, category: Category) -> Result<Vec<RawArticle>, BoxError> {
        let url = format!("{}?rss_url={}", self.bridge_url, urlencoding::encode(feed.url));
        let response: BridgeResponse = self.http.get(&url).send().await?.json().await?;
        Ok(shape_response(response, feed.name, category))
    }
}

fn shape_response(response: BridgeResponse, feed_name: &str, category: Category) -> Vec<RawArticle> {
    if response.status != "ok" {
        warn!(
            feed = feed_name,
            status = %response.status,
            "Feed bridge reported an error payload; treating as zero items"
        );
        return Vec::new();
    }

    response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(MAX_ITEMS_PER_FEED)
        .filter_map(|item| item_to_raw(item, feed_name, category))
        .collect()
}

/// Convert one bridge item, excluding items without a title or link.
fn item_to_raw(item: BridgeItem, feed_name: &str, category: Category) -> Option<RawArticle> {
    let title = item.title.filter(|t| !t.trim().is_empty())?;
    let url = item.link.filter(|l| !l.trim().is_empty())?;

    let image_url = item
        .thumbnail
        .filter(|t| !t.trim().is_empty())
        .or_else(|| item.enclosure.and_then(|e| e.link).filter(|l| !l.trim().is_empty()));

    let description = item
        .description
        .map(|d| strip_html(&d))
        .filter(|d| !d.is_empty());
    let content = item
        .content
        .map(|c| strip_html(&c))
        .filter(|c| !c.is_empty());

    Some(RawArticle {
        upstream_id: item.guid.filter(|g| !g.trim().is_empty()),
        title: strip_html(&title),
        description,
        content,
        url,
        image_url,
        published_at: item.pub_date.as_deref().and_then(parse_feed_date),
        source_name: feed_name.to_string(),
        author: item.author.filter(|a| !a.trim().is_empty()),
        category,
    })
}

/// Parse the bridge's `pubDate`. The bridge normalizes timestamps to
/// `YYYY-MM-DD HH:MM:SS` (UTC); RFC 3339 and RFC 2822 are accepted as
/// well since raw feeds occasionally leak through unconverted.
fn parse_feed_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_feed() {
        for category in Category::ALL {
            assert!(
                !feeds_for(category).is_empty(),
                "no feed mapping for {category}"
            );
        }
    }

    #[test]
    fn test_parse_feed_date_formats() {
        let bridged = parse_feed_date("2025-05-06 10:30:00").unwrap();
        assert_eq!(bridged.to_rfc3339(), "2025-05-06T10:30:00+00:00");

        let rfc2822 = parse_feed_date("Tue, 06 May 2025 10:30:00 +0000").unwrap();
        assert_eq!(rfc2822, bridged);

        assert!(parse_feed_date("yesterday").is_none());
    }

    #[test]
    fn test_item_to_raw_uses_enclosure_when_thumbnail_absent() {
        let body = r#"{
            "guid": "https://example.com/guid/1",
            "title": "Feed <b>headline</b>",
            "link": "https://example.com/story",
            "description": "<p>Plain summary.</p>",
            "content": "",
            "thumbnail": "",
            "enclosure": {"link": "https://example.com/pic.jpg"},
            "pubDate": "2025-05-06 08:00:00",
            "author": "Reporter"
        }"#;
        let item: BridgeItem = serde_json::from_str(body).unwrap();
        let raw = item_to_raw(item, "BBC News", Category::World).unwrap();
        assert_eq!(raw.title, "Feed headline");
        assert_eq!(raw.description.as_deref(), Some("Plain summary."));
        assert_eq!(raw.image_url.as_deref(), Some("https://example.com/pic.jpg"));
        assert_eq!(raw.upstream_id.as_deref(), Some("https://example.com/guid/1"));
        assert!(raw.content.is_none());
        assert_eq!(raw.source_name, "BBC News");
    }

    #[test]
    fn test_item_to_raw_drops_link_less_items() {
        let body = r#"{"title": "No link", "link": ""}"#;
        let item: BridgeItem = serde_json::from_str(body).unwrap();
        assert!(item_to_raw(item, "BBC News", Category::General).is_none());
    }

    #[test]
    fn test_shape_response_bounds_item_count() {
        let items: Vec<String> = (0..25)
            .map(|i| {
                format!(
                    r#"{{"title": "Item {i}", "link": "https://example.com/{i}"}}"#
                )
            })
            .collect();
        let body = format!(r#"{{"status": "ok", "items": [{}]}}"#, items.join(","));
        let response: BridgeResponse = serde_json::from_str(&body).unwrap();
        let shaped = shape_response(response, "BBC News", Category::General);
        assert_eq!(shaped.len(), MAX_ITEMS_PER_FEED);
    }
}
