//! The crawl run loop
//!
//! The supervisor is the only consumer of the frontier. It pulls tasks with
//! an idle timeout, claims each URL through the seen set, and hands claimed
//! tasks to the dispatcher. When a timeout fires with no work in flight and
//! the frontier confirmed empty, the crawl is done.

use crate::crawler::dispatcher::Dispatcher;
use crate::frontier::{Frontier, Task};
use std::sync::Arc;
use std::time::Duration;

/// Run-loop state machine: RUNNING until the frontier drains, then DONE
pub struct Supervisor {
    frontier: Arc<Frontier>,
    dispatcher: Dispatcher,
    idle_timeout: Duration,
}

impl Supervisor {
    pub fn new(frontier: Arc<Frontier>, dispatcher: Dispatcher, idle_timeout: Duration) -> Self {
        Self {
            frontier,
            dispatcher,
            idle_timeout,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Returns once the frontier has been empty for the idle timeout with no
    /// in-flight work left. Completion callbacks already running on workers
    /// may still finish after this returns; they only touch the shared
    /// frontier, sink, and stats, all of which stay valid.
    pub async fn run(&self) {
        loop {
            match self.frontier.dequeue(self.idle_timeout).await {
                Some(task) => self.claim_and_submit(task).await,

                None => {
                    if self.dispatcher.in_flight() > 0 {
                        // Workers may still push links or retries; stay RUNNING
                        tracing::debug!(
                            in_flight = self.dispatcher.in_flight(),
                            "Idle timeout with work in flight, continuing"
                        );
                        continue;
                    }

                    // A worker may have pushed at the same instant the
                    // timeout fired; only an empty re-check ends the crawl.
                    match self.frontier.try_dequeue() {
                        Some(task) => self.claim_and_submit(task).await,
                        None => break,
                    }
                }
            }
        }

        tracing::info!("Frontier drained and idle, crawl complete");
    }

    /// Claims the task's URL and submits it to the pool
    ///
    /// Original attempts pass through the seen set's atomic test-and-insert
    /// and are discarded when the URL was already claimed. Retries skip the
    /// check: their URL was claimed on the first attempt by design.
    async fn claim_and_submit(&self, task: Task) {
        if task.attempt == 0 && !self.frontier.mark_seen_if_new(&task.url) {
            tracing::trace!("Already claimed, discarding {}", task.url);
            return;
        }

        tracing::debug!(attempt = task.attempt, "Dispatching {}", task.url);
        self.dispatcher.submit(task).await;
    }
}
