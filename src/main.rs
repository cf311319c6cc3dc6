// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load and validate the JSON crawl config
// 3. Crawl the start pages over HTTP, timing the crawl and every fetch
// 4. Write the JSON result and the profiling report
// 5. Exit with proper code (0 = success, 2 = error)
//
// Status messages and logs go to stderr, so stdout only ever carries the
// JSON result.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use word_crawler::clock::{Clock, SystemClock};
use word_crawler::profiler::{ProfiledPageSource, Profiler};
use word_crawler::{CrawlResult, Crawler, CrawlerFileConfig, HttpPageSource};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG controls verbosity, e.g. RUST_LOG=word_crawler=debug
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let file = CrawlerFileConfig::from_path(&cli.config)
        .with_context(|| format!("Loading config {}", cli.config.display()))?;
    let config = file.crawl_config().context("Invalid crawl config")?;

    eprintln!("🔍 Crawling {} start page(s)", file.start_pages.len());
    eprintln!("📊 Max depth: {}, timeout: {:?}", config.max_depth, config.timeout);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Arc::new(Profiler::new(Arc::clone(&clock)));

    let http = HttpPageSource::new(Duration::from_secs(cli.request_timeout))
        .context("Building HTTP client")?
        .with_ignored_words(&file.ignored_words)?;
    let source = ProfiledPageSource::new(http, Arc::clone(&profiler));
    let crawler = Crawler::with_clock(Arc::new(source), clock);

    let result = profiler
        .profile("Crawler#crawl", crawler.crawl(&file.start_pages, &config))
        .await?;

    eprintln!(
        "📄 Visited {} page(s), {} failed",
        result.urls_visited, result.urls_failed
    );

    write_result(&result, cli.result_path(&file.result_path).as_deref())?;
    write_profile(&profiler, cli.profile_path(&file.profile_output_path).as_deref())?;

    Ok(())
}

// Writes the result as pretty JSON to `path`, or stdout when there is none
fn write_result(result: &CrawlResult, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Creating result file {}", path.display()))?;
            serde_json::to_writer_pretty(&mut file, result)?;
            writeln!(file)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, result)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

// Profile data is appended so several runs can share one file
fn write_profile(profiler: &Profiler, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Opening profile file {}", path.display()))?;
            profiler.write_data(&mut file)?;
        }
        None => profiler.write_data(&mut io::stdout().lock())?,
    }
    Ok(())
}
