//! Durable output for the crawl
//!
//! Two append-only files: the CSV export that records land in, and the
//! failure log that permanent losses are noted in. Both share the same
//! fatality policy: an open or write failure invalidates the run and is
//! surfaced as a fatal error rather than swallowed.

mod csv_sink;
mod failure_log;

pub use csv_sink::CsvSink;
pub use failure_log::FailureLog;
