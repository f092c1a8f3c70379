//! Append-only failure log
//!
//! Non-fatal losses (dropped fetches, pages that defeated extraction twice)
//! are noted here for later diagnosis. Failing to open or append to the log
//! is fatal, same as the result sink: diagnostics that silently vanish are
//! worse than none.

use crate::{DredgeError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Serialized writer over the failure log file
pub struct FailureLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FailureLog {
    /// Opens (or creates) the failure log in append mode
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| DredgeError::FailureLog {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Appends one timestamped entry
    pub fn record(&self, reason: &str, url: &str) -> Result<()> {
        let line = format!("{} {}: {}\n", chrono::Utc::now().to_rfc3339(), reason, url);

        let mut file = self.file.lock().unwrap();
        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| DredgeError::FailureLog {
                path: self.path.display().to_string(),
                source,
            })
    }
}
