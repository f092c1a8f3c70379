//! Crawl run counters
//!
//! Shared read-mostly counters bumped from worker tasks and read by the
//! supervisor for the end-of-run summary. Relaxed ordering is enough; the
//! counters carry no synchronization duty.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Tasks handed to the dispatcher (original attempts and retries)
    pub dispatched: AtomicU64,

    /// Fetches that failed with a transport error or non-2xx status
    pub fetch_failures: AtomicU64,

    /// Listing pages processed
    pub listing_pages: AtomicU64,

    /// Records appended to the export
    pub records_written: AtomicU64,

    /// Detail pages re-queued after a total extraction failure
    pub retries: AtomicU64,

    /// Detail pages given up on after the retry also came back empty
    pub permanent_losses: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dispatch(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_listing_page(&self) {
        self.listing_pages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_permanent_loss(&self) {
        self.permanent_losses.fetch_add(1, Ordering::Relaxed);
    }

    /// Logs the run summary
    pub fn log_summary(&self) {
        tracing::info!(
            dispatched = self.dispatched.load(Ordering::Relaxed),
            fetch_failures = self.fetch_failures.load(Ordering::Relaxed),
            listing_pages = self.listing_pages.load(Ordering::Relaxed),
            records_written = self.records_written.load(Ordering::Relaxed),
            retries = self.retries.load(Ordering::Relaxed),
            permanent_losses = self.permanent_losses.load(Ordering::Relaxed),
            "crawl summary"
        );
    }
}
