//! Reading records and the per-page dataset.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::alert::{Alert, AlertThresholds};

/// One simulated sensor observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Local wall-clock time of the observation.
    pub timestamp: NaiveDateTime,
    /// Particles per liter.
    pub concentration: u32,
    /// Average particle size in millimeters, two decimals.
    pub particle_size: f64,
}

/// Readings for one page load, oldest first, with their derived alerts.
///
/// `alerts[i]` is always the classification of `readings[i]`. The dataset
/// cannot be modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    readings: Vec<Reading>,
    alerts: Vec<Alert>,
}

impl Dataset {
    /// Build a dataset, classifying every reading against `thresholds`.
    pub fn new(readings: Vec<Reading>, thresholds: &AlertThresholds) -> Self {
        let mut alerts = Vec::with_capacity(readings.len());
        for reading in &readings {
            alerts.push(thresholds.classify(reading.concentration));
        }
        Self { readings, alerts }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate readings paired with their alert, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&Reading, Alert)> + '_ {
        self.readings.iter().zip(self.alerts.iter().copied())
    }

    /// The most recent reading and its alert.
    pub fn latest(&self) -> Option<(&Reading, Alert)> {
        let reading = self.readings.last()?;
        let alert = *self.alerts.last()?;
        Some((reading, alert))
    }

    /// Count readings per alert level as (safe, moderate, high).
    pub fn alert_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for alert in &self.alerts {
            match alert {
                Alert::Safe => counts.0 += 1,
                Alert::Moderate => counts.1 += 1,
                Alert::High => counts.2 += 1,
            }
        }
        counts
    }
}
