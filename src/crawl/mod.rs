// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Features:
// - Parallel crawling of a link graph from several starting URLs
// - Configurable hop limit and overall deadline
// - Ignored-URL patterns
// - Every URL fetched at most once per run
// - Word totals aggregated across all visited pages
//
// Submodules:
// - coordinator: the Crawler type and its crawl() entry point
// - task: the recursive per-URL task
// - state: visited set, word counter, failure count
// - filter: ignored-URL patterns
// =============================================================================

mod coordinator;
mod filter;
mod state;
mod task;

pub use coordinator::Crawler;
pub use filter::UrlFilter;
pub use state::{VisitedSet, WordCounter};
