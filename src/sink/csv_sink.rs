//! CSV result sink
//!
//! Appends harvested records to a CSV file with the fixed header
//! `Title,ISBN,ISBN13,Author,URL`. The header is written only when the file
//! starts out empty; a later run appends below the existing rows. At most
//! one writer executes the append-and-flush sequence at any instant.
//!
//! The sink does not deduplicate. Uniqueness of records comes from the
//! frontier's at-most-once dispatch guarantee.

use crate::record::{Record, FIELD_NAMES};
use crate::{DredgeError, Result};
use csv::Writer;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Serialized writer over the CSV export file
pub struct CsvSink {
    path: PathBuf,
    writer: Mutex<Writer<File>>,
}

impl CsvSink {
    /// Opens (or creates) the export file, emitting the header if the file
    /// is new
    ///
    /// # Errors
    ///
    /// Any I/O failure here is fatal to the caller: a sink that cannot be
    /// opened invalidates the whole run.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| DredgeError::Sink {
                path: path.display().to_string(),
                source,
            })?;

        let is_new = file
            .metadata()
            .map_err(|source| DredgeError::Sink {
                path: path.display().to_string(),
                source,
            })?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(FIELD_NAMES)?;
            writer.flush().map_err(|source| DredgeError::Sink {
                path: path.display().to_string(),
                source,
            })?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    /// Appends one record and flushes
    ///
    /// The serialize-append-flush sequence runs under the sink's mutex, so
    /// concurrent callers never interleave partial rows. Duplicate calls for
    /// the same record append duplicate rows; that is the caller's problem.
    pub fn write(&self, record: &Record) -> Result<()> {
        let mut writer = self.writer.lock().unwrap();

        writer.write_record(record.as_row())?;
        writer.flush().map_err(|source| DredgeError::Sink {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// The export file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
