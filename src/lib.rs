//! Bookdredge: a concurrent book-metadata harvester
//!
//! This crate implements a crawler that walks a linked set of pages from a
//! seed URL, alternating between listing pages (which yield more links) and
//! detail pages (which yield one book record), and appends the harvested
//! records to a CSV file.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod frontier;
pub mod record;
pub mod sink;
pub mod stats;
pub mod url;

use thiserror::Error;

/// Main error type for Bookdredge operations
#[derive(Debug, Error)]
pub enum DredgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Seed URL has no host: {0}")]
    SeedWithoutHost(String),

    #[error("Output sink error for {path}: {source}")]
    Sink {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failure log error for {path}: {source}")]
    FailureLog {
        path: String,
        source: std::io::Error,
    },
}

impl DredgeError {
    /// Whether this error invalidates the output sink and must abort the
    /// whole process rather than being tolerated for one task.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DredgeError::Sink { .. } | DredgeError::Csv(_) | DredgeError::FailureLog { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bookdredge operations
pub type Result<T> = std::result::Result<T, DredgeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::extract::{BookExtractor, Extractor};
pub use crate::record::Record;
pub use crate::url::{PageKind, RootOrigin};
