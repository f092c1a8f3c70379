//! Completion handling for fetched pages
//!
//! Every fetch, success or failure, lands here. The handler classifies the
//! page by the shape of its final URL and routes it: listing pages feed
//! discovered links back into the frontier, detail pages become records (or
//! one retry, or a logged loss). This is the feedback loop that keeps the
//! crawl going — completions are messages back into the frontier, not a
//! deepening call stack.

use crate::crawler::fetcher::FetchOutcome;
use crate::extract::Extractor;
use crate::frontier::{Frontier, Task};
use crate::sink::{CsvSink, FailureLog};
use crate::stats::CrawlStats;
use crate::url::{classify, PageKind, RootOrigin};
use crate::Result;
use std::sync::Arc;

/// Routes fetch results into the frontier, the sink, or the failure log
pub struct CompletionHandler {
    origin: RootOrigin,
    detail_fragment: String,
    extractor: Arc<dyn Extractor>,
    frontier: Arc<Frontier>,
    sink: Arc<CsvSink>,
    failures: Arc<FailureLog>,
    stats: Arc<CrawlStats>,
}

impl CompletionHandler {
    pub fn new(
        origin: RootOrigin,
        detail_fragment: String,
        extractor: Arc<dyn Extractor>,
        frontier: Arc<Frontier>,
        sink: Arc<CsvSink>,
        failures: Arc<FailureLog>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            origin,
            detail_fragment,
            extractor,
            frontier,
            sink,
            failures,
            stats,
        }
    }

    /// Handles the completion of one fetch
    ///
    /// Transport failures and non-2xx responses drop the task with a logged
    /// note and no retry. Successful pages are classified by final URL path:
    /// listing pages never produce records and detail pages never produce
    /// links.
    ///
    /// # Errors
    ///
    /// Only sink and failure-log I/O errors escape; the caller treats those
    /// as fatal to the whole process.
    pub fn on_complete(&self, task: &Task, outcome: FetchOutcome) -> Result<()> {
        match outcome {
            FetchOutcome::TransportError { error } => {
                self.stats.record_fetch_failure();
                tracing::warn!("Dropping {} after transport failure: {}", task.url, error);
                self.failures.record("fetch dropped", task.url.as_str())?;
                Ok(())
            }

            FetchOutcome::HttpError { status } => {
                self.stats.record_fetch_failure();
                tracing::warn!("Dropping {} after HTTP {}", task.url, status);
                self.failures.record("fetch dropped", task.url.as_str())?;
                Ok(())
            }

            FetchOutcome::Success {
                final_url, body, ..
            } => match classify(&final_url, &self.detail_fragment) {
                PageKind::Listing => {
                    self.handle_listing(&final_url, &body);
                    Ok(())
                }
                PageKind::Detail => self.handle_detail(task, &final_url, &body),
            },
        }
    }

    /// Feeds a listing page's same-origin links back into the frontier
    fn handle_listing(&self, final_url: &url::Url, body: &str) {
        self.stats.record_listing_page();

        let links = self.extractor.links(body, final_url);
        let mut enqueued = 0usize;

        for link in links {
            if self.origin.contains(&link) {
                self.frontier.enqueue(link);
                enqueued += 1;
            }
        }

        tracing::debug!("Listing {} yielded {} in-origin links", final_url, enqueued);
    }

    /// Emits a record for a detail page, or spends the retry budget
    fn handle_detail(&self, task: &Task, final_url: &url::Url, body: &str) -> Result<()> {
        let record = self.extractor.record(body, final_url);

        if record.has_fields() {
            self.sink.write(&record)?;
            self.stats.record_written();
            tracing::debug!("Wrote record for {}", final_url);
            return Ok(());
        }

        // Only provenance came back: the page defeated extraction entirely
        match task.retry() {
            Some(retry) => {
                self.stats.record_retry();
                tracing::warn!("Extraction found nothing in {}, retrying once", task.url);
                self.frontier.requeue(retry);
            }
            None => {
                self.stats.record_permanent_loss();
                tracing::warn!("Extraction failed twice for {}, giving up", task.url);
                self.failures
                    .record("extraction failed twice", task.url.as_str())?;
            }
        }

        Ok(())
    }
}
