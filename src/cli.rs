//! Command-line interface definitions.
//!
//! The CLI mirrors the façade one subcommand per operation. All options
//! can be provided via flags or environment variables.

use crate::models::Category;
use clap::{Parser, Subcommand};

/// Command-line arguments for the worldnews CLI.
///
/// # Examples
///
/// ```sh
/// # Category headlines, pretty-printed
/// worldnews headlines --category technology --pretty
///
/// # Paginated search, written to a file
/// worldnews search "climate" --page 2 --page-size 5 -o results.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Headline API key (absent or placeholder value disables that source)
    #[arg(long, env = "NEWSAPI_KEY", global = true)]
    pub api_key: Option<String>,

    /// Two-letter country code for the headline API
    #[arg(long, default_value = "us", global = true)]
    pub country: String,

    /// Write the JSON envelope to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Pretty-print the JSON envelope
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch top headlines, optionally scoped to a category
    Headlines {
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Search articles by free text, with pagination
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Fetch headlines for a mandatory category
    Category { category: Category },
}
