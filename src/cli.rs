// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The crawl itself is described by a JSON config file (see config.rs).
// The flags here only override where the output goes.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version = "0.1.0",
    about = "Crawl linked pages in parallel and report the most popular words",
    long_about = "word-crawler follows links from a set of starting pages, up to a maximum \
                  depth and within a time limit, and reports the most frequent words it saw \
                  along with the number of pages visited."
)]
pub struct Cli {
    /// Path to the JSON crawl configuration
    ///
    /// Example: word-crawler crawl.json
    pub config: PathBuf,

    /// Write the JSON result here instead of the config's resultPath
    #[arg(long)]
    pub result_path: Option<PathBuf>,

    /// Append profiling data here instead of the config's profileOutputPath
    #[arg(long)]
    pub profile_path: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub request_timeout: u64,
}

impl Cli {
    // An empty path in the config file means stdout
    pub fn result_path(&self, from_config: &str) -> Option<PathBuf> {
        pick_path(&self.result_path, from_config)
    }

    pub fn profile_path(&self, from_config: &str) -> Option<PathBuf> {
        pick_path(&self.profile_path, from_config)
    }
}

fn pick_path(flag: &Option<PathBuf>, from_config: &str) -> Option<PathBuf> {
    match flag {
        Some(path) => Some(path.clone()),
        None if from_config.is_empty() => None,
        None => Some(PathBuf::from(from_config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::parse_from(["word-crawler", "crawl.json"]);
        assert_eq!(cli.config, PathBuf::from("crawl.json"));
        assert_eq!(cli.request_timeout, 10);
        assert_eq!(cli.result_path(""), None);
        assert_eq!(cli.result_path("out.json"), Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_flag_overrides_config_path() {
        let cli = Cli::parse_from([
            "word-crawler",
            "crawl.json",
            "--profile-path",
            "p.txt",
        ]);
        assert_eq!(cli.profile_path("other.txt"), Some(PathBuf::from("p.txt")));
    }
}
