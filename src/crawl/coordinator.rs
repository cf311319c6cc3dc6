// src/crawl/coordinator.rs
// =============================================================================
// This module runs a whole crawl.
//
// How it works:
// 1. Validate the config (patterns, parallelism, timeout)
// 2. deadline = clock.now() + timeout
// 3. Create an empty visited set and word counter for this run
// 4. Spawn one root task per starting URL with the full hop budget
// 5. Wait until every task, including all descendants, has finished
// 6. Rank the word totals and build the CrawlResult
//
// Only configuration problems are returned as errors. Pages that fail to
// load are logged and counted in `urls_failed`; the rest of the crawl
// keeps going and the result covers whatever was reached.
// =============================================================================

use super::filter::UrlFilter;
use super::state::{FailureCount, VisitedSet, WordCounter};
use super::task::{visit, CrawlContext};
use crate::clock::{Clock, SystemClock};
use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::source::PageSource;
use crate::words::{select_popular, CrawlResult};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Crawls pages from a `PageSource`, timing deadlines with a `Clock`.
#[derive(Clone)]
pub struct Crawler {
    source: Arc<dyn PageSource>,
    clock: Arc<dyn Clock>,
}

impl Crawler {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn PageSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Crawls from `starting_urls` and returns the popular words and the
    /// number of distinct pages visited.
    pub async fn crawl(
        &self,
        starting_urls: &[String],
        config: &CrawlConfig,
    ) -> Result<CrawlResult, ConfigError> {
        let filter = UrlFilter::new(&config.ignored_urls)?;
        let parallelism = config.effective_parallelism()?;
        let deadline = self
            .clock
            .now()
            .checked_add(config.timeout)
            .ok_or(ConfigError::TimeoutOverflow(config.timeout))?;

        info!(
            "Crawling {} starting URL(s): max_depth={}, timeout={:?}, parallelism={}",
            starting_urls.len(),
            config.max_depth,
            config.timeout,
            parallelism
        );

        let ctx = Arc::new(CrawlContext {
            deadline,
            clock: Arc::clone(&self.clock),
            source: Arc::clone(&self.source),
            filter,
            permits: Semaphore::new(parallelism),
            visited: VisitedSet::new(),
            counts: WordCounter::new(),
            failures: FailureCount::default(),
        });

        let mut roots = JoinSet::new();
        for url in starting_urls {
            roots.spawn(visit(Arc::clone(&ctx), url.clone(), config.max_depth));
        }

        while let Some(joined) = roots.join_next().await {
            if let Err(e) = joined {
                warn!("Root crawl task ended abnormally: {}", e);
            }
        }

        let urls_visited = ctx.visited.len();
        let urls_failed = ctx.failures.get();

        let word_counts = if ctx.counts.is_empty() {
            Default::default()
        } else {
            select_popular(ctx.counts.snapshot(), config.popular_word_count)
        };

        info!(
            "Crawl finished: {} URL(s) visited, {} failed",
            urls_visited, urls_failed
        );

        Ok(CrawlResult {
            word_counts,
            urls_visited,
            urls_failed,
        })
    }
}
