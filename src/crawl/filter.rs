// src/crawl/filter.rs
// =============================================================================
// Ignored-URL patterns.
//
// A URL is skipped when any pattern matches the *whole* URL. Skipped URLs
// are never fetched and never count as visited.
// =============================================================================

use crate::error::ConfigError;
use crate::config::compile_anchored;
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    patterns: Vec<Regex>,
}

impl UrlFilter {
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            patterns: compile_anchored(patterns)?,
        })
    }

    pub fn is_ignored(&self, url: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> UrlFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        UrlFilter::new(&patterns).unwrap()
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        assert!(!filter(&[]).is_ignored("https://example.com/"));
    }

    #[test]
    fn test_pattern_must_match_whole_url() {
        let f = filter(&["https://example\\.com/private"]);
        assert!(f.is_ignored("https://example.com/private"));
        assert!(!f.is_ignored("https://example.com/private/page"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let f = filter(&["http(s)?://.*\\.(png|jpg)", ".*/logout"]);
        assert!(f.is_ignored("https://cdn.example.com/a.png"));
        assert!(f.is_ignored("http://example.com/logout"));
        assert!(!f.is_ignored("https://example.com/a.html"));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = UrlFilter::new(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
