// src/source/mod.rs
// =============================================================================
// This module defines where page content comes from.
//
// The crawl engine only sees the PageSource trait: give it a URL, get back
// the words on that page and the links it points to. How the page is
// fetched and parsed is up to the implementation.
//
// Submodules:
// - http: fetches pages over HTTP and parses the HTML
// - memory: serves a fixed in-memory link graph (tests, dry runs)
//
// Rust concepts:
// - async_trait: async methods on a trait used as `dyn PageSource`
// - Send + Sync: a page source is shared by every crawl task
// =============================================================================

mod http;
mod memory;

pub use http::{parse_page, HttpPageSource};
pub use memory::StaticPageSource;

use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Words and outbound links found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Occurrences of each word on the page
    pub word_counts: HashMap<String, u64>,
    /// Outbound links, in document order
    pub links: Vec<String>,
}

impl ParsedPage {
    pub fn new(word_counts: HashMap<String, u64>, links: Vec<String>) -> Self {
        Self { word_counts, links }
    }
}

/// Produces a parsed page for a URL.
///
/// Implementations must be safe to call concurrently and should return the
/// same page for the same URL within one crawl.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedPage, FetchError>;
}
