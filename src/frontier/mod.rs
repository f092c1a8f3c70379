//! The crawl frontier
//!
//! The frontier is the deduplicating work queue at the center of the crawl:
//! an unbounded FIFO of pending tasks plus the seen set of every URL ever
//! claimed for dispatch. Workers push discovered links and retries from their
//! completion callbacks; only the supervisor pops.
//!
//! Deduplication does not happen at enqueue time. A URL may sit in the queue
//! many times; `mark_seen_if_new` is the single linearization point that
//! guarantees it is dispatched at most once.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use url::Url;

/// A unit of crawl work: a URL plus its attempt counter
///
/// Attempt 0 is the original dispatch; attempt 1 is the single retry granted
/// after a total extraction failure. There is no attempt 2.
#[derive(Debug, Clone)]
pub struct Task {
    pub url: Url,
    pub attempt: u8,
}

impl Task {
    pub fn new(url: Url) -> Self {
        Self { url, attempt: 0 }
    }

    /// The retry for this task, or None if the retry budget is spent
    pub fn retry(&self) -> Option<Task> {
        if self.attempt == 0 {
            Some(Task {
                url: self.url.clone(),
                attempt: 1,
            })
        } else {
            None
        }
    }
}

/// Deduplicating work queue shared by the supervisor and all workers
pub struct Frontier {
    queue: Mutex<VecDeque<Task>>,
    seen: Mutex<HashSet<String>>,
    notify: Notify,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            seen: Mutex::new(HashSet::new()),
            notify: Notify::new(),
        }
    }

    /// Adds a URL to the pending queue unconditionally
    ///
    /// Duplicates are allowed here; they are filtered out at claim time by
    /// `mark_seen_if_new`. Never fails while the process is running.
    pub fn enqueue(&self, url: Url) {
        self.push(Task::new(url));
    }

    /// Puts a retry task back on the queue
    ///
    /// Retries bypass the seen set when dequeued (their URL was claimed on
    /// the original attempt), so callers must only requeue tasks produced by
    /// `Task::retry`.
    pub fn requeue(&self, task: Task) {
        self.push(task);
    }

    fn push(&self, task: Task) {
        self.queue.lock().unwrap().push_back(task);
        self.notify.notify_one();
    }

    /// Pops the next task, waiting up to `timeout` for one to appear
    ///
    /// Returns None when the timeout elapses with the queue still empty.
    /// Safe for concurrent callers, though in practice only the supervisor
    /// dequeues.
    pub async fn dequeue(&self, timeout: Duration) -> Option<Task> {
        let deadline = Instant::now() + timeout;

        loop {
            // Register for a wakeup before checking the queue, so a push that
            // lands between the check and the await is not lost.
            let notified = self.notify.notified();

            if let Some(task) = self.queue.lock().unwrap().pop_front() {
                return Some(task);
            }

            let remaining = deadline.checked_duration_since(Instant::now())?;
            if tokio::time::timeout(remaining, notified).await.is_err() {
                return None;
            }
        }
    }

    /// Non-blocking pop
    ///
    /// The supervisor uses this after an idle timeout to close the race where
    /// a worker pushed work at the same instant the timeout fired.
    pub fn try_dequeue(&self) -> Option<Task> {
        self.queue.lock().unwrap().pop_front()
    }

    /// Atomically tests seen-set membership and inserts if absent
    ///
    /// Returns true when the URL was newly claimed. The test and the insert
    /// are one operation under one lock acquisition; two callers racing on
    /// the same URL cannot both see true.
    pub fn mark_seen_if_new(&self, url: &Url) -> bool {
        self.seen.lock().unwrap().insert(url.to_string())
    }

    /// Returns the number of pending tasks
    pub fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Returns whether the pending queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap().is_empty()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_enqueue_dequeue_fifo() {
        let frontier = Frontier::new();
        frontier.enqueue(url("https://example.org/a"));
        frontier.enqueue(url("https://example.org/b"));

        let first = frontier.dequeue(Duration::from_millis(50)).await.unwrap();
        let second = frontier.dequeue(Duration::from_millis(50)).await.unwrap();
        assert_eq!(first.url.as_str(), "https://example.org/a");
        assert_eq!(second.url.as_str(), "https://example.org/b");
    }

    #[tokio::test]
    async fn test_dequeue_times_out_when_empty() {
        let frontier = Frontier::new();
        let start = std::time::Instant::now();
        let task = frontier.dequeue(Duration::from_millis(50)).await;
        assert!(task.is_none());
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_dequeue_wakes_on_concurrent_enqueue() {
        let frontier = Arc::new(Frontier::new());

        let producer = {
            let frontier = frontier.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                frontier.enqueue(url("https://example.org/late"));
            })
        };

        let task = frontier.dequeue(Duration::from_secs(5)).await;
        assert!(task.is_some());
        producer.await.unwrap();
    }

    #[test]
    fn test_mark_seen_claims_once() {
        let frontier = Frontier::new();
        let u = url("https://example.org/book/show/42");
        assert!(frontier.mark_seen_if_new(&u));
        assert!(!frontier.mark_seen_if_new(&u));
    }

    #[tokio::test]
    async fn test_mark_seen_claims_once_under_concurrency() {
        let frontier = Arc::new(Frontier::new());
        let u = url("https://example.org/book/show/42");

        let mut handles = Vec::new();
        for _ in 0..32 {
            let frontier = frontier.clone();
            let u = u.clone();
            handles.push(tokio::spawn(
                async move { frontier.mark_seen_if_new(&u) },
            ));
        }

        let mut claims = 0;
        for handle in handles {
            if handle.await.unwrap() {
                claims += 1;
            }
        }
        assert_eq!(claims, 1);
    }

    #[test]
    fn test_duplicate_enqueue_is_allowed() {
        let frontier = Frontier::new();
        frontier.enqueue(url("https://example.org/a"));
        frontier.enqueue(url("https://example.org/a"));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_retry_budget() {
        let task = Task::new(url("https://example.org/book/show/42"));
        let retry = task.retry().unwrap();
        assert_eq!(retry.attempt, 1);
        assert!(retry.retry().is_none());
    }

    #[test]
    fn test_try_dequeue() {
        let frontier = Frontier::new();
        assert!(frontier.try_dequeue().is_none());
        frontier.enqueue(url("https://example.org/a"));
        assert!(frontier.try_dequeue().is_some());
        assert!(frontier.try_dequeue().is_none());
    }
}
