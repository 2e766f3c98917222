//! Reading source abstraction.
//!
//! A source produces the readings for one page load. The dashboard ships
//! with a simulated sensor and a replay source for previously exported CSV
//! files.

mod file;
mod simulated;

pub use file::CsvFileSource;
pub use simulated::SimulatedSensor;

use std::fmt::Debug;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::data::Reading;

/// Trait for producing readings from various sources.
///
/// # Example
///
/// ```
/// use chrono::Local;
/// use microplastic_dashboard::config::GeneratorConfig;
/// use microplastic_dashboard::{ReadingSource, SimulatedSensor};
///
/// let mut source = SimulatedSensor::seeded(GeneratorConfig::default(), Some(42));
/// let readings = source.load(Local::now().naive_local()).unwrap();
/// assert_eq!(readings.len(), 10);
/// ```
pub trait ReadingSource: Send + Debug {
    /// Produce the readings for a page load at `now`, oldest first.
    fn load(&mut self, now: NaiveDateTime) -> Result<Vec<Reading>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
