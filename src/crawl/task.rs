// src/crawl/task.rs
// =============================================================================
// The recursive crawl task.
//
// One task = one URL with a remaining hop budget. In order:
// 1. Wait for a worker permit
// 2. Stop if the deadline has passed
// 3. Stop if the URL is ignored
// 4. Stop if another task already claimed the URL
// 5. Fetch and parse the page; on failure log it and stop this branch
// 6. Add the page's word counts to the shared totals
// 7. Release the permit, then if hops remain spawn one child task per
//    link and wait for all of them
//
// The deadline is only checked before a fetch starts. A fetch that is
// already running is allowed to finish.
//
// Rust concepts:
// - BoxFuture: an async fn can't call itself directly, so the recursive
//   task returns a boxed future
// - JoinSet: owns the child tasks and lets the parent wait for all of them
// - Arc: every task holds a reference-counted pointer to the shared context
// =============================================================================

use super::filter::UrlFilter;
use super::state::{FailureCount, VisitedSet, WordCounter};
use crate::clock::Clock;
use crate::source::PageSource;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, trace, warn};

// Everything a task needs, shared by all tasks of one crawl run
pub(crate) struct CrawlContext {
    pub deadline: Instant,
    pub clock: Arc<dyn Clock>,
    pub source: Arc<dyn PageSource>,
    pub filter: UrlFilter,
    pub permits: Semaphore,
    pub visited: VisitedSet,
    pub counts: WordCounter,
    pub failures: FailureCount,
}

impl CrawlContext {
    fn deadline_passed(&self) -> bool {
        self.clock.now() >= self.deadline
    }
}

// Visits `url` and, if hops remain, everything it links to
pub(crate) fn visit(
    ctx: Arc<CrawlContext>,
    url: String,
    remaining_depth: usize,
) -> BoxFuture<'static, ()> {
    async move {
        let Some(links) = visit_page(&ctx, &url).await else {
            return;
        };

        if remaining_depth == 0 || links.is_empty() {
            return;
        }

        let mut children = JoinSet::new();
        for link in links {
            children.spawn(visit(Arc::clone(&ctx), link, remaining_depth - 1));
        }

        while let Some(joined) = children.join_next().await {
            if let Err(e) = joined {
                warn!("Crawl task under {} ended abnormally: {}", url, e);
            }
        }
    }
    .boxed()
}

// Runs the gates and the fetch for one URL
//
// Returns the page's links, or None when the task should stop.
async fn visit_page(ctx: &CrawlContext, url: &str) -> Option<Vec<String>> {
    // The permit is dropped when this function returns, before any child
    // is awaited, so a parent never holds a slot its children need
    let _permit = ctx.permits.acquire().await.ok()?;

    if ctx.deadline_passed() {
        trace!("Deadline passed, skipping {}", url);
        return None;
    }

    if ctx.filter.is_ignored(url) {
        trace!("Ignored by pattern: {}", url);
        return None;
    }

    if !ctx.visited.claim(url) {
        trace!("Already visited: {}", url);
        return None;
    }

    match ctx.source.fetch_and_parse(url).await {
        Ok(page) => {
            debug!(
                "Visited {} ({} distinct words, {} links)",
                url,
                page.word_counts.len(),
                page.links.len()
            );
            ctx.counts.merge(&page.word_counts);
            Some(page.links)
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            ctx.failures.record();
            None
        }
    }
}
