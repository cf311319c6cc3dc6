// src/lib.rs
// =============================================================================
// word-crawler: a parallel crawler that counts words across linked pages.
//
// Give it some starting URLs, a hop limit and a deadline. It follows links
// in parallel, fetches each page at most once, adds up the words on every
// page and reports the most popular ones along with how many pages it saw.
//
// Modules:
// - crawl: the engine (Crawler, tasks, shared state, URL filter)
// - source: where pages come from (PageSource trait, HTTP, in-memory)
// - words: popular-word ranking and the CrawlResult
// - config: engine config and the JSON config file
// - clock: injectable time source
// - profiler: timing of crawl and fetch calls
// - error: error types
//
// Example:
//   let crawler = Crawler::new(Arc::new(HttpPageSource::new(timeout)?));
//   let result = crawler.crawl(&start_pages, &CrawlConfig::default()).await?;
// =============================================================================

pub mod clock;
pub mod config;
pub mod crawl;
pub mod error;
pub mod profiler;
pub mod source;
pub mod words;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{CrawlConfig, CrawlerFileConfig};
pub use crawl::Crawler;
pub use error::{ConfigError, FetchError};
pub use source::{HttpPageSource, PageSource, ParsedPage, StaticPageSource};
pub use words::{select_popular, CrawlResult, PopularWords};
