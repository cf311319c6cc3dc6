// src/words.rs
// =============================================================================
// Popular-word selection and the final crawl result.
//
// Ranking rule, applied in order:
// 1. Higher count first
// 2. Longer word first (length in characters)
// 3. Alphabetical order
//
// The ranked list keeps its order all the way into the JSON output, so
// the first key of "wordCounts" is always the most popular word.
//
// Rust concepts:
// - sort_by with Ordering::then_with: multi-key comparisons
// - Custom Serialize: emit a Vec of pairs as an ordered JSON object
// =============================================================================

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Words ranked by popularity, most popular first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularWords(Vec<(String, u64)>);

impl PopularWords {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    // Count for a word, if it made the cut
    pub fn get(&self, word: &str) -> Option<u64> {
        self.iter().find(|(w, _)| *w == word).map(|(_, count)| count)
    }

    pub fn into_vec(self) -> Vec<(String, u64)> {
        self.0
    }
}

impl Serialize for PopularWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

// Ranks `counts` and keeps the top `k` entries
//
// Example:
//   counts = {"a": 3, "bb": 3, "c": 1}, k = 2
//   result = [("bb", 3), ("a", 3)]
pub fn select_popular(counts: HashMap<String, u64>, k: usize) -> PopularWords {
    if k == 0 {
        return PopularWords::default();
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(compare_popularity);
    ranked.truncate(k);

    PopularWords(ranked)
}

fn compare_popularity(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Outcome of one crawl run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most popular words, in ranking order
    pub word_counts: PopularWords,
    /// Number of distinct URLs claimed by the crawl
    pub urls_visited: usize,
    /// Number of visited URLs whose fetch failed
    pub urls_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_tie_broken_by_length_then_alphabet() {
        let popular = select_popular(counts(&[("a", 3), ("bb", 3), ("c", 1)]), 2);
        assert_eq!(
            popular.into_vec(),
            vec![("bb".to_string(), 3), ("a".to_string(), 3)]
        );
    }

    #[test]
    fn test_alphabetical_tie_break() {
        let popular = select_popular(counts(&[("pear", 2), ("kiwi", 2), ("plum", 2)]), 3);
        let words: Vec<&str> = popular.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["kiwi", "pear", "plum"]);
    }

    #[test]
    fn test_count_beats_length() {
        let popular = select_popular(counts(&[("a", 5), ("longer", 4)]), 2);
        assert_eq!(popular.get("a"), Some(5));
        assert_eq!(popular.iter().next(), Some(("a", 5)));
    }

    #[test]
    fn test_fewer_words_than_k() {
        let popular = select_popular(counts(&[("x", 1), ("y", 2)]), 10);
        assert_eq!(popular.len(), 2);
    }

    #[test]
    fn test_zero_k_is_empty() {
        let popular = select_popular(counts(&[("x", 1)]), 0);
        assert!(popular.is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        // "éé" is 4 bytes but 2 characters, so "abc" is longer
        let popular = select_popular(counts(&[("éé", 1), ("abc", 1)]), 2);
        assert_eq!(popular.iter().next(), Some(("abc", 1)));
    }

    #[test]
    fn test_result_json_keeps_ranking_order() {
        let result = CrawlResult {
            word_counts: select_popular(counts(&[("a", 3), ("bb", 3), ("zzz", 9)]), 3),
            urls_visited: 4,
            urls_failed: 1,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"wordCounts":{"zzz":9,"bb":3,"a":3},"urlsVisited":4,"urlsFailed":1}"#
        );
    }
}
