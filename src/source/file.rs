//! File-based reading source.
//!
//! Replays a CSV file previously written by the download control.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use chrono::NaiveDateTime;

use super::ReadingSource;
use crate::data::Reading;
use crate::export::read_csv;

/// A reading source that loads readings from an exported CSV file.
///
/// The file is re-read on every page load, so edits show up on refresh.
/// The `now` instant is ignored; timestamps come from the file.
#[derive(Debug)]
pub struct CsvFileSource {
    path: PathBuf,
    description: String,
}

impl CsvFileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being replayed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingSource for CsvFileSource {
    fn load(&mut self, _now: NaiveDateTime) -> Result<Vec<Reading>> {
        let readings = read_csv(&self.path)?;
        ensure!(
            !readings.is_empty(),
            "{} contains no readings",
            self.path.display()
        );
        Ok(readings)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
