// src/profiler.rs
// =============================================================================
// A small timing profiler.
//
// Wrap any future with `profiler.profile("Name#op", fut)` and the time it
// took is added to that name's total. The totals can then be written out
// as a plain text report:
//
//   Run at Sun, 18 Oct 2026 12:00:00 +0000
//   Crawler#crawl took 0m 2s 13ms
//   Crawler#crawl was called 1 times
//
// ProfiledPageSource wraps a PageSource so every fetch is timed.
//
// Rust concepts:
// - Generic wrapper types: ProfiledPageSource<S> works for any S
// - dashmap: concurrent totals from many tasks at once
// =============================================================================

use crate::clock::Clock;
use crate::error::FetchError;
use crate::source::{PageSource, ParsedPage};
use async_trait::async_trait;
use dashmap::DashMap;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    pub total: Duration,
    pub calls: u64,
}

pub struct Profiler {
    clock: Arc<dyn Clock>,
    timings: DashMap<String, Timing>,
}

impl Profiler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timings: DashMap::new(),
        }
    }

    /// Awaits `fut`, adding its elapsed time to `name`'s total.
    pub async fn profile<F: Future>(&self, name: &str, fut: F) -> F::Output {
        let start = self.clock.now();
        let output = fut.await;
        let elapsed = self.clock.now().saturating_duration_since(start);
        self.record(name, elapsed);
        output
    }

    pub fn record(&self, name: &str, elapsed: Duration) {
        let mut timing = self.timings.entry(name.to_string()).or_default();
        timing.total += elapsed;
        timing.calls += 1;
    }

    pub fn timing(&self, name: &str) -> Option<Timing> {
        self.timings.get(name).map(|t| *t)
    }

    // Writes the report, one block per name in alphabetical order
    pub fn write_data(&self, writer: &mut impl Write) -> io::Result<()> {
        let mut entries: Vec<(String, Timing)> = self
            .timings
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        writeln!(writer, "Run at {}", chrono::Utc::now().to_rfc2822())?;
        for (name, timing) in &entries {
            writeln!(writer, "{} took {}", name, format_duration(timing.total))?;
        }
        for (name, timing) in &entries {
            writeln!(writer, "{} was called {} times", name, timing.calls)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    format!(
        "{}m {}s {}ms",
        millis / 60_000,
        (millis / 1_000) % 60,
        millis % 1_000
    )
}

/// Times every fetch of the wrapped page source.
pub struct ProfiledPageSource<S> {
    inner: S,
    profiler: Arc<Profiler>,
}

impl<S: PageSource> ProfiledPageSource<S> {
    pub fn new(inner: S, profiler: Arc<Profiler>) -> Self {
        Self { inner, profiler }
    }
}

#[async_trait]
impl<S: PageSource> PageSource for ProfiledPageSource<S> {
    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        self.profiler
            .profile("PageSource#fetch_and_parse", self.inner.fetch_and_parse(url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::source::StaticPageSource;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(62_345)), "1m 2s 345ms");
        assert_eq!(format_duration(Duration::ZERO), "0m 0s 0ms");
    }

    #[test]
    fn test_record_accumulates() {
        let profiler = Profiler::new(Arc::new(FakeClock::new()));
        profiler.record("A#b", Duration::from_secs(1));
        profiler.record("A#b", Duration::from_secs(2));

        assert_eq!(
            profiler.timing("A#b"),
            Some(Timing {
                total: Duration::from_secs(3),
                calls: 2
            })
        );
    }

    #[tokio::test]
    async fn test_profile_uses_clock() {
        let profiler = Profiler::new(Arc::new(FakeClock::with_step(Duration::from_millis(250))));

        let value = profiler.profile("Job#run", async { 7 }).await;

        assert_eq!(value, 7);
        assert_eq!(
            profiler.timing("Job#run").map(|t| t.total),
            Some(Duration::from_millis(250))
        );
    }

    #[tokio::test]
    async fn test_profiled_source_records_fetches() {
        let profiler = Arc::new(Profiler::new(Arc::new(FakeClock::new())));
        let source = ProfiledPageSource::new(
            StaticPageSource::new().page("a", &[], &[]),
            Arc::clone(&profiler),
        );

        source.fetch_and_parse("a").await.unwrap();
        source.fetch_and_parse("missing").await.unwrap_err();

        assert_eq!(
            profiler.timing("PageSource#fetch_and_parse").map(|t| t.calls),
            Some(2)
        );
    }

    #[test]
    fn test_write_data_is_sorted() {
        let profiler = Profiler::new(Arc::new(FakeClock::new()));
        profiler.record("Z#last", Duration::from_millis(5));
        profiler.record("A#first", Duration::from_millis(1_500));

        let mut out = Vec::new();
        profiler.write_data(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Run at "));
        assert_eq!(lines[1], "A#first took 0m 1s 500ms");
        assert_eq!(lines[2], "Z#last took 0m 0s 5ms");
        assert_eq!(lines[3], "A#first was called 1 times");
        assert_eq!(lines[4], "Z#last was called 1 times");
    }
}
