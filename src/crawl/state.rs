// src/crawl/state.rs
// =============================================================================
// State shared by every task of one crawl run.
//
// - VisitedSet: URLs already claimed. claim() is a single atomic
//   insert-if-absent, so two tasks racing for the same URL can't both win.
// - WordCounter: running word totals. Each merge locks one shard of the
//   map per word, never the whole map, and additions commute, so the order
//   tasks finish in doesn't change the totals.
//
// Rust concepts:
// - dashmap: a HashMap split into independently locked shards
// - AtomicUsize: lock-free counter for failed fetches
// =============================================================================

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the first caller to claim `url`.
    pub fn claim(&self, url: &str) -> bool {
        // DashSet::insert locks the shard for the check and the insert
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct WordCounter {
    counts: DashMap<String, u64>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds one page's counts into the totals
    pub fn merge(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    // Copies the totals out once the crawl is finished
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

/// Number of fetches that failed during the run.
#[derive(Debug, Default)]
pub struct FailureCount(AtomicUsize);

impl FailureCount {
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_claim_is_first_wins() {
        let visited = VisitedSet::new();
        assert!(visited.claim("a"));
        assert!(!visited.claim("a"));
        assert!(visited.claim("b"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let visited = Arc::clone(&visited);
                thread::spawn(move || visited.claim("https://example.com/"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_merge_adds_counts() {
        let counter = WordCounter::new();
        counter.merge(&HashMap::from([("a".to_string(), 2), ("b".to_string(), 1)]));
        counter.merge(&HashMap::from([("a".to_string(), 3)]));

        let totals = counter.snapshot();
        assert_eq!(totals.get("a"), Some(&5));
        assert_eq!(totals.get("b"), Some(&1));
    }

    #[test]
    fn test_concurrent_merges_lose_nothing() {
        let counter = Arc::new(WordCounter::new());
        let page = HashMap::from([("word".to_string(), 3)]);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                let page = page.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        counter.merge(&page);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.snapshot().get("word"), Some(&2400));
    }

    #[test]
    fn test_failure_count() {
        let failures = FailureCount::default();
        failures.record();
        failures.record();
        assert_eq!(failures.get(), 2);
    }
}
