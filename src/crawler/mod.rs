//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling machinery:
//! - HTTP fetching and error classification
//! - The bounded dispatcher pool
//! - Completion handling (the listing/detail feedback loop)
//! - The supervisor run loop

mod completion;
mod dispatcher;
mod fetcher;
mod supervisor;

pub use completion::CompletionHandler;
pub use dispatcher::Dispatcher;
pub use fetcher::{build_http_client, fetch_url, FetchOutcome};
pub use supervisor::Supervisor;

use crate::config::Config;
use crate::extract::{BookExtractor, Extractor};
use crate::frontier::Frontier;
use crate::sink::{CsvSink, FailureLog};
use crate::stats::CrawlStats;
use crate::url::RootOrigin;
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Runs a complete crawl with the default book extractor
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the CSV export and the failure log (fatal on failure)
/// 2. Derive the root origin from the seed and preload the frontier
/// 3. Build the HTTP client and the worker pool
/// 4. Run the supervisor loop until the frontier drains
/// 5. Log the run summary
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(())` - Crawl completed normally
/// * `Err(DredgeError)` - Startup failed (bad seed, unopenable sink)
pub async fn crawl(config: Config) -> Result<()> {
    crawl_with_extractor(config, Arc::new(BookExtractor::new())).await
}

/// Runs a complete crawl with a caller-supplied extractor
pub async fn crawl_with_extractor(
    config: Config,
    extractor: Arc<dyn Extractor>,
) -> Result<()> {
    let seed = Url::parse(&config.site.seed_url)?;
    let origin = RootOrigin::from_seed(&seed)?;

    let sink = Arc::new(CsvSink::open(Path::new(&config.output.export_path))?);
    let failures = Arc::new(FailureLog::open(Path::new(&config.output.failure_log_path))?);

    let frontier = Arc::new(Frontier::new());
    frontier.enqueue(seed);

    let stats = Arc::new(CrawlStats::new());
    let client = build_http_client(&config.crawler, &config.user_agent)?;

    let handler = Arc::new(CompletionHandler::new(
        origin,
        config.site.detail_path_fragment.clone(),
        extractor,
        frontier.clone(),
        sink,
        failures,
        stats.clone(),
    ));

    let dispatcher = Dispatcher::new(
        config.crawler.workers as usize,
        client,
        handler,
        stats.clone(),
    );

    let supervisor = Supervisor::new(
        frontier,
        dispatcher,
        Duration::from_secs(config.crawler.idle_timeout_secs),
    );

    tracing::info!(
        seed = %config.site.seed_url,
        workers = config.crawler.workers,
        "Starting crawl"
    );

    supervisor.run().await;
    stats.log_summary();

    Ok(())
}
