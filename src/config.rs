// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Two layers:
// - CrawlConfig: what the crawl engine needs (timeout, depth, word count,
//   ignored URLs, parallelism). Types are unsigned, so nothing negative
//   can reach the engine.
// - CrawlerFileConfig: the JSON file the CLI reads. Numbers are signed
//   here so a negative value is reported as a config error instead of a
//   confusing JSON type error.
//
// Example file:
//   {
//     "startPages": ["https://example.com/"],
//     "ignoredUrls": [".*\\.pdf"],
//     "ignoredWords": ["^.{1,3}$"],
//     "parallelism": 4,
//     "maxDepth": 2,
//     "timeoutSeconds": 10,
//     "popularWordCount": 5,
//     "resultPath": "result.json",
//     "profileOutputPath": "profile.txt"
//   }
//
// Rust concepts:
// - serde(default): missing keys fall back to Default::default()
// - serde(rename_all = "camelCase"): JSON keys vs Rust field names
// =============================================================================

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one call to `Crawler::crawl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Time after which no new page is fetched
    pub timeout: Duration,
    /// Link hops followed from each starting URL
    pub max_depth: usize,
    /// How many popular words to report
    pub popular_word_count: usize,
    /// Regex patterns; a fully matching URL is skipped
    pub ignored_urls: Vec<String>,
    /// Requested number of pages processed at once
    pub parallelism: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            max_depth: 0,
            popular_word_count: 0,
            ignored_urls: Vec::new(),
            parallelism: available_parallelism(),
        }
    }
}

impl CrawlConfig {
    // Parallelism actually used: the requested value, capped at the
    // number of hardware threads
    pub fn effective_parallelism(&self) -> Result<usize, ConfigError> {
        if self.parallelism == 0 {
            return Err(ConfigError::ZeroParallelism);
        }
        Ok(self.parallelism.min(available_parallelism()))
    }
}

pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

// Compiles each pattern so that it must match the entire input
pub fn compile_anchored(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// The JSON configuration file read by the CLI.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CrawlerFileConfig {
    pub start_pages: Vec<String>,
    pub ignored_urls: Vec<String>,
    pub ignored_words: Vec<String>,
    pub parallelism: Option<i64>,
    pub max_depth: i64,
    pub timeout_seconds: Option<i64>,
    pub popular_word_count: i64,
    pub profile_output_path: String,
    pub result_path: String,
}

impl CrawlerFileConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    // Validates the file values and converts them for the engine
    pub fn crawl_config(&self) -> Result<CrawlConfig, ConfigError> {
        let defaults = CrawlConfig::default();

        let timeout = match self.timeout_seconds {
            Some(secs) => Duration::from_secs(non_negative("timeoutSeconds", secs)?),
            None => defaults.timeout,
        };

        let parallelism = match self.parallelism {
            Some(n) => non_negative("parallelism", n)? as usize,
            None => defaults.parallelism,
        };

        // Fail on bad patterns now rather than at crawl time
        compile_anchored(&self.ignored_urls)?;
        compile_anchored(&self.ignored_words)?;

        let config = CrawlConfig {
            timeout,
            max_depth: non_negative("maxDepth", self.max_depth)? as usize,
            popular_word_count: non_negative("popularWordCount", self.popular_word_count)? as usize,
            ignored_urls: self.ignored_urls.clone(),
            parallelism,
        };
        config.effective_parallelism()?;

        Ok(config)
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })
}
