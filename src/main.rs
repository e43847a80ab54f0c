//! # worldnews
//!
//! A multi-source news aggregation pipeline. Articles are fetched from a
//! paid headline API, free RSS feeds (via an RSS-to-JSON bridge), and a
//! public discussion-site API, normalized into one canonical article
//! model, merged, recency-sorted, and returned as a uniform JSON envelope.
//! When no source yields data the pipeline substitutes curated fallback
//! articles instead of surfacing an error.
//!
//! ## Usage
//!
//! ```sh
//! worldnews headlines --category technology
//! NEWSAPI_KEY=... worldnews search "climate" --page 2 --page-size 5
//! ```
//!
//! ## Architecture
//!
//! 1. **Adapters**: one per upstream, each containing its own failures
//! 2. **Normalizer**: raw partial fields into the canonical article shape
//! 3. **Aggregator**: concurrent fan-out, merge, dedup, recency ranking
//! 4. **Fallback**: curated sample articles when the merge comes up empty
//! 5. **Façade**: three operations, each returning a well-formed envelope

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use worldnews::cli::{Cli, Command};
use worldnews::{NewsClient, NewsConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("worldnews starting up");

    let args = Cli::parse();
    debug!(?args.country, ?args.output, "Parsed CLI arguments");

    let config = NewsConfig {
        api_key: args.api_key.clone(),
        country: args.country.clone(),
        ..NewsConfig::default()
    };
    let client = NewsClient::new(config)?;

    let envelope = match &args.command {
        Command::Headlines { category } => client.top_headlines(*category).await,
        Command::Search {
            query,
            page,
            page_size,
        } => client.search(query, Some(*page), *page_size).await,
        Command::Category { category } => client.by_category(*category).await,
    };

    info!(
        total = envelope.total_results,
        returned = envelope.articles.len(),
        "Query complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &json).await?;
            info!(path = %path, "Wrote envelope JSON");
        }
        None => println!("{json}"),
    }

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
