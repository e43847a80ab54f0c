//! Cross-source aggregation.
//!
//! The aggregator owns the three adapters and turns one request into one
//! ordered article list:
//!
//! 1. select the adapters applicable to the category/query
//! 2. invoke them concurrently; each settles independently, so one
//!    adapter's failure never blocks another's results
//! 3. normalize, deduplicate by url, shuffle, then stable-sort by
//!    `published_at` descending
//! 4. substitute fallback articles when the merged set is empty
//!
//! The shuffle before the stable sort makes insertion order among equal
//! timestamps effectively random per call. That is the documented contract:
//! ordering is only specified for distinct timestamps.

use crate::config::NewsConfig;
use crate::fallback;
use crate::models::{Article, Category, RawArticle};
use crate::normalize::normalize;
use crate::sources::discussion::DiscussionApi;
use crate::sources::feeds::FeedBridge;
use crate::sources::headline::HeadlineApi;
use crate::sources::SourceResult;
use itertools::Itertools;
use rand::seq::SliceRandom;
use tracing::{info, instrument};

/// Orchestrates the source adapters for one process.
///
/// Stateless after construction; every request is self-contained.
#[derive(Debug, Clone)]
pub struct Aggregator {
    headline: HeadlineApi,
    feeds: FeedBridge,
    discussion: DiscussionApi,
}

impl Aggregator {
    pub fn new(http: reqwest::Client, config: &NewsConfig) -> Self {
        Self {
            headline: HeadlineApi::new(http.clone(), config),
            feeds: FeedBridge::new(http.clone(), config),
            discussion: DiscussionApi::new(http, config),
        }
    }

    /// Fetch, merge, and rank articles for a request. Infallible: any
    /// combination of adapter failures degrades to the fallback set.
    ///
    /// The returned list is recency-sorted and deduplicated but not
    /// truncated; the façade slices it so `totalResults` can reflect the
    /// pre-truncation count.
    #[instrument(level = "info", skip(self))]
    pub async fn collect(&self, category: Option<Category>, query: Option<&str>) -> Vec<Article> {
        // The discussion site only covers general/technology ground; the
        // feed table covers every category, defaulting to general for
        // uncategorized (search) requests.
        let discussion_applies = matches!(
            category,
            None | Some(Category::General) | Some(Category::Technology)
        );
        let feed_category = category.unwrap_or(Category::General);

        let (headline, feeds, discussion) = tokio::join!(
            self.headline.fetch(category, query),
            self.feeds.fetch(feed_category),
            async {
                if discussion_applies {
                    self.discussion.fetch().await
                } else {
                    SourceResult::Unavailable
                }
            },
        );

        let mut raw: Vec<RawArticle> = Vec::new();
        raw.extend(headline.into_items("headline"));
        raw.extend(feeds.into_items("feeds"));
        raw.extend(discussion.into_items("discussion"));
        info!(count = raw.len(), ?category, "Merged adapter results");

        merge(raw, category)
    }
}

/// Normalize, deduplicate, and rank a merged raw set, substituting
/// fallback articles when it is empty. Pure apart from randomness and the
/// clock.
pub(crate) fn merge(raw: Vec<RawArticle>, category: Option<Category>) -> Vec<Article> {
    if raw.is_empty() {
        info!(?category, "All adapters empty; substituting fallback articles");
        return fallback::generate(category);
    }

    let articles: Vec<Article> = raw
        .into_iter()
        .map(normalize)
        .unique_by(|article| article.url.clone())
        .collect();
    rank(articles)
}

/// Shuffle, then stable-sort by recency descending.
pub(crate) fn rank(mut articles: Vec<Article>) -> Vec<Article> {
    articles.shuffle(&mut rand::rng());
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}

/// Case-insensitive substring filter over title, description, and content.
pub(crate) fn filter_by_query(articles: Vec<Article>, query: &str) -> Vec<Article> {
    let needle = query.to_lowercase();
    articles
        .into_iter()
        .filter(|article| {
            article.title.to_lowercase().contains(&needle)
                || article.description.to_lowercase().contains(&needle)
                || article
                    .content
                    .as_deref()
                    .is_some_and(|content| content.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Offset/limit pagination: 1-based `page`, `(page-1)*page_size ..
/// page*page_size` of the filtered set.
pub(crate) fn paginate(articles: Vec<Article>, page: usize, page_size: usize) -> Vec<Article> {
    let page = page.max(1);
    articles
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSource;
    use chrono::{TimeZone, Utc};

    fn article(title: &str, hours_ago: i64) -> Article {
        Article {
            id: format!("test-{title}"),
            title: title.to_string(),
            description: format!("About {title}"),
            content: Some(format!("Body of {title}")),
            url: format!("https://example.com/{title}"),
            image_url: None,
            published_at: Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap()
                - chrono::Duration::hours(hours_ago),
            source: ArticleSource {
                name: "Test Source".to_string(),
            },
            author: None,
            category: Category::General,
        }
    }

    fn raw(title: &str, url: &str) -> RawArticle {
        RawArticle {
            upstream_id: None,
            title: title.to_string(),
            description: None,
            content: None,
            url: url.to_string(),
            image_url: None,
            published_at: None,
            source_name: "Test Source".to_string(),
            author: None,
            category: Category::General,
        }
    }

    #[test]
    fn test_rank_is_strictly_descending_for_distinct_timestamps() {
        // Input deliberately unordered; the pre-sort shuffle must not leak
        // into the final order when timestamps are distinct.
        for _ in 0..10 {
            let ranked = rank(vec![
                article("c", 2),
                article("a", 0),
                article("d", 3),
                article("b", 1),
            ]);
            let titles: Vec<&str> = ranked.iter().map(|a| a.title.as_str()).collect();
            assert_eq!(titles, ["a", "b", "c", "d"]);
        }
    }

    #[test]
    fn test_merge_deduplicates_by_url() {
        let merged = merge(
            vec![
                raw("First", "https://example.com/same"),
                raw("Second", "https://example.com/same"),
                raw("Third", "https://example.com/other"),
            ],
            None,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_empty_set_yields_fallback_for_category() {
        let merged = merge(Vec::new(), Some(Category::Sports));
        let expected: Vec<String> = fallback::generate(Some(Category::Sports))
            .into_iter()
            .map(|a| a.title)
            .collect();
        let titles: Vec<String> = merged.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_filter_by_query_is_case_insensitive_across_fields() {
        let mut in_content = article("plain", 0);
        in_content.content = Some("Quantum TECHNOLOGY advances".to_string());
        let mut in_description = article("other", 1);
        in_description.description = "A technology story".to_string();
        let unrelated = article("sports", 2);

        let filtered = filter_by_query(
            vec![in_content, in_description, unrelated],
            "technology",
        );
        assert_eq!(filtered.len(), 2);

        let none = filter_by_query(vec![article("x", 0)], "zzz_no_such_token");
        assert!(none.is_empty());
    }

    #[test]
    fn test_paginate_slices_the_filtered_set() {
        let articles: Vec<Article> =
            (0..12).map(|i| article(&format!("n{i}"), i)).collect();

        let page2 = paginate(articles.clone(), 2, 5);
        let titles: Vec<&str> = page2.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["n5", "n6", "n7", "n8", "n9"]);

        // Page past the end is empty, page 0 is clamped to page 1.
        assert!(paginate(articles.clone(), 4, 5).is_empty());
        assert_eq!(paginate(articles, 0, 5).len(), 5);
    }
}
