//! Multi-source news aggregation and normalization.
//!
//! This crate queries several heterogeneous upstream news sources (a paid
//! headline API, free RSS feeds via an RSS-to-JSON bridge, and a public
//! discussion-site API), normalizes their disparate shapes into one
//! canonical [`Article`] model, and degrades gracefully: any combination
//! of missing credentials, network failures, and empty upstreams still
//! produces a well-formed [`ResponseEnvelope`], worst case composed of
//! curated fallback articles.
//!
//! The public surface is [`NewsClient`], the query façade. Everything
//! below it (adapters, normalizer, aggregator, fallback generator) is an
//! implementation detail.
//!
//! ```no_run
//! use worldnews::{Category, NewsClient, NewsConfig};
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let client = NewsClient::new(NewsConfig::default())?;
//! let envelope = client.top_headlines(Some(Category::Technology)).await;
//! for article in &envelope.articles {
//!     println!("{} ({})", article.title, article.source.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cli;
pub mod client;
pub mod config;
pub mod fallback;
pub mod models;
pub mod normalize;
pub mod sources;

pub use client::NewsClient;
pub use config::NewsConfig;
pub use models::{Article, ArticleSource, Category, ResponseEnvelope};
