//! Source adapters for the upstream news providers.
//!
//! One submodule per upstream:
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Paid headline API | [`headline`] | JSON REST, credential-gated |
//! | RSS-to-JSON bridge | [`feeds`] | One feed per call, bounded item count |
//! | Ranked discussion site | [`discussion`] | Id-list prefix plus per-item fetch |
//!
//! Adapters share one calling convention: given a request they return a
//! [`SourceResult`], never an error. Transport and parse failures are
//! contained at this boundary; nothing above it ever handles a rejected
//! call. Failure is data here, not control flow.

use crate::models::RawArticle;
use tracing::{debug, warn};

pub mod discussion;
pub mod feeds;
pub mod headline;

/// Boxed error type for adapter-internal plumbing.
///
/// `Send + Sync` so adapter futures stay spawnable by library callers.
pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of one adapter call.
///
/// Explicit success/unavailable/failure variants replace the original
/// design's thrown-and-caught exceptions as the "try next source" signal.
/// The aggregator composes these; it never sees a raw transport error.
#[derive(Debug)]
pub enum SourceResult {
    /// The adapter ran and produced zero or more items.
    Fetched(Vec<RawArticle>),
    /// The adapter declined to run (missing credential, no feed mapping,
    /// category outside its coverage). Not a failure.
    Unavailable,
    /// Transport or parse failure, already stringified for logging.
    Failed(String),
}

impl SourceResult {
    /// Collapse the outcome into items, logging the non-success cases.
    ///
    /// This is the containment point for the error taxonomy: a failed or
    /// unavailable adapter contributes zero items and the pipeline moves on.
    pub fn into_items(self, source: &'static str) -> Vec<RawArticle> {
        match self {
            SourceResult::Fetched(items) => {
                debug!(source, count = items.len(), "Adapter returned items");
                items
            }
            SourceResult::Unavailable => {
                debug!(source, "Adapter unavailable for this request");
                Vec::new()
            }
            SourceResult::Failed(reason) => {
                warn!(source, error = %reason, "Adapter failed; contributing zero items");
                Vec::new()
            }
        }
    }
}
