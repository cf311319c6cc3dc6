// src/error.rs
// =============================================================================
// Error types shared by the crawl engine and its page sources.
//
// Only configuration errors ever reach the caller of `Crawler::crawl`.
// Fetch errors stay inside the branch that produced them: the crawl logs
// them, counts them and carries on with the rest of the traversal.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: automatic conversion so `?` works across error types
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors detected while loading or validating crawl configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An ignored-URL or ignored-word pattern is not a valid regex
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A numeric option that must not be negative was negative
    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: i64 },

    /// Parallelism must be at least one worker
    #[error("'parallelism' must be at least 1")]
    ZeroParallelism,

    /// The deadline computed from the timeout does not fit the clock
    #[error("Timeout of {0:?} is too large")]
    TimeoutOverflow(std::time::Duration),

    /// The config file could not be read
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for our schema
    #[error("Could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors a page source can report for a single URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// The URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The page source knows nothing about this URL
    #[error("Page not found: {0}")]
    NotFound(String),
}
