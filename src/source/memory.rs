// src/source/memory.rs
// =============================================================================
// An in-memory page source.
//
// Pages are registered up front as url -> (words, links). Every request is
// appended to a call log, which is how tests check that no URL is fetched
// twice. URLs that were never registered, or were registered as failing,
// return an error.
// =============================================================================

use super::{PageSource, ParsedPage};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct StaticPageSource {
    pages: HashMap<String, ParsedPage>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers a page
    //
    // Example:
    //   source.page("a", &[("hello", 2)], &["b", "c"])
    pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let word_counts = words.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        let links = links.iter().map(|l| l.to_string()).collect();
        self.pages.insert(url.to_string(), ParsedPage::new(word_counts, links));
        self
    }

    // Registers a URL whose fetch always fails
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Every URL requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl PageSource for StaticPageSource {
    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        if self.failing.contains(url) {
            return Err(FetchError::Status(500));
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}
