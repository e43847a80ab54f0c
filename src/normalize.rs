//! Normalization of raw adapter output into canonical articles.
//!
//! [`normalize`] is a total, pure function: given any [`RawArticle`] (which
//! by adapter contract already has a non-empty title and url) it produces a
//! complete [`Article`] with every optional field defaulted:
//!
//! - `id`: sha-256 derived from source plus upstream id, or source plus url
//! - `description`: a generic placeholder when absent
//! - `content`: falls back to the description, then the title
//! - `image_url`: a category-specific placeholder when absent
//! - `published_at`: the current time when the upstream omitted it
//! - `author`: the source name when absent
//!
//! Normalization is idempotent: re-normalizing an already-normalized record
//! changes nothing, so no double-defaulting artifacts can accumulate.

use crate::models::{Article, ArticleSource, Category, RawArticle};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Placeholder description for items whose upstream carried none.
pub const DEFAULT_DESCRIPTION: &str = "Read the full story at the original source.";

/// Matches HTML/XML tags for stripping.
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
/// Collapses runs of whitespace left behind by stripped block tags.
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws pattern"));

/// Turn a raw adapter item into a canonical article.
pub fn normalize(raw: RawArticle) -> Article {
    let id = match raw.upstream_id.as_deref() {
        Some(upstream_id) => derive_id(&raw.source_name, upstream_id),
        None => derive_id(&raw.source_name, &raw.url),
    };

    let description = non_empty(raw.description);
    let content = non_empty(raw.content)
        .or_else(|| description.clone())
        .or_else(|| Some(raw.title.clone()));
    let description = description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    Article {
        id,
        title: raw.title.trim().to_string(),
        description,
        content,
        url: raw.url.trim().to_string(),
        image_url: non_empty(raw.image_url)
            .or_else(|| Some(placeholder_image(raw.category))),
        published_at: raw.published_at.unwrap_or_else(Utc::now),
        author: non_empty(raw.author).or_else(|| Some(raw.source_name.clone())),
        source: ArticleSource {
            name: raw.source_name,
        },
        category: raw.category,
    }
}

/// Deterministic article id: a slug of the source name plus a truncated
/// sha-256 of the source-scoped key (upstream id or url).
pub(crate) fn derive_id(source_name: &str, key: &str) -> String {
    let digest = Sha256::digest(format!("{source_name}:{key}").as_bytes());
    let hex: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();
    format!("{}-{}", slugify(source_name), hex)
}

/// Category-specific placeholder image, stable per category.
pub(crate) fn placeholder_image(category: Category) -> String {
    format!("https://picsum.photos/seed/{category}/800/450")
}

/// Strip markup from upstream text: removes tags, decodes the handful of
/// entities feeds actually emit, and collapses whitespace.
pub(crate) fn strip_html(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, " ");
    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ");
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Lowercase, hyphenated, URL-safe rendering of a source name.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
