//! Bounded worker pool
//!
//! The dispatcher runs at most `workers` concurrent fetches. `submit`
//! acquires a pool slot before spawning, so a saturated pool backs the
//! supervisor up instead of letting connections pile up without limit. The
//! slot is released as soon as the fetch finishes; completion handling runs
//! outside it.
//!
//! The in-flight count covers the whole task, fetch and completion both. It
//! is what lets the supervisor distinguish "frontier empty because we are
//! done" from "frontier empty while workers are still about to push links".

use crate::crawler::completion::CompletionHandler;
use crate::crawler::fetcher::fetch_url;
use crate::frontier::Task;
use crate::stats::CrawlStats;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fixed-capacity pool of fetch workers
pub struct Dispatcher {
    semaphore: Arc<Semaphore>,
    in_flight: Arc<AtomicUsize>,
    client: Client,
    handler: Arc<CompletionHandler>,
    stats: Arc<CrawlStats>,
}

impl Dispatcher {
    /// Creates a dispatcher with capacity for `workers` concurrent fetches
    pub fn new(
        workers: usize,
        client: Client,
        handler: Arc<CompletionHandler>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(workers)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            client,
            handler,
            stats,
        }
    }

    /// Hands a claimed task to the pool
    ///
    /// Blocks until a pool slot is free (the backpressure point), then runs
    /// the fetch and its completion on a spawned worker task. The task is
    /// counted in-flight from before this returns until its completion
    /// handling has finished, including any frontier pushes it makes.
    pub async fn submit(&self, task: Task) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.stats.record_dispatch();

        let permit = match self.semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            // The semaphore is never closed; this arm is unreachable but
            // must not leave the in-flight count dangling.
            Err(_) => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                return;
            }
        };

        let client = self.client.clone();
        let handler = self.handler.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let outcome = fetch_url(&client, &task.url).await;

            // The slot bounds concurrent connections, not completion work
            drop(permit);

            if let Err(e) = handler.on_complete(&task, outcome) {
                if e.is_fatal() {
                    tracing::error!("Fatal sink failure, aborting crawl: {}", e);
                    std::process::exit(1);
                }
                tracing::warn!("Completion handling failed for {}: {}", task.url, e);
            }

            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    /// Number of tasks submitted but not yet fully completed
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}
