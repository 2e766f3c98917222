//! Alert classification for concentration readings.
//!
//! A reading's alert depends only on its own concentration: there is no
//! cross-reading state and no hysteresis.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Concentration cut points (particles per liter) for alert classification.
///
/// Values below `moderate` are [`Alert::Safe`], values in
/// `moderate..high` are [`Alert::Moderate`], everything from `high` up is
/// [`Alert::High`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// First concentration that counts as moderate.
    pub moderate: u32,
    /// First concentration that counts as high.
    pub high: u32,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            moderate: 100,
            high: 150,
        }
    }
}

impl AlertThresholds {
    /// Classify a concentration against these cut points.
    pub fn classify(&self, concentration: u32) -> Alert {
        if concentration >= self.high {
            Alert::High
        } else if concentration >= self.moderate {
            Alert::Moderate
        } else {
            Alert::Safe
        }
    }

    /// Reject cut points that would make the moderate band negative.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.moderate <= self.high,
            "alerts.moderate ({}) must not exceed alerts.high ({})",
            self.moderate,
            self.high
        );
        Ok(())
    }
}

/// Three-level status derived from a concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Alert {
    Safe,
    Moderate,
    High,
}

impl Alert {
    /// Plain label, as written to CSV.
    pub fn label(&self) -> &'static str {
        match self {
            Alert::Safe => "Safe",
            Alert::Moderate => "Moderate",
            Alert::High => "High",
        }
    }

    /// Label with a status glyph for on-screen display.
    pub fn badge(&self) -> &'static str {
        match self {
            Alert::Safe => "✔ Safe",
            Alert::Moderate => "▲ Moderate",
            Alert::High => "✖ High",
        }
    }

    /// Parse a label produced by [`Alert::label`] or [`Alert::badge`].
    pub fn from_label(s: &str) -> Option<Self> {
        let word = s.trim().rsplit(' ').next().unwrap_or("");
        match word.to_ascii_lowercase().as_str() {
            "safe" => Some(Alert::Safe),
            "moderate" => Some(Alert::Moderate),
            "high" => Some(Alert::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a concentration with the default cut points (100 and 150).
pub fn classify(concentration: u32) -> Alert {
    AlertThresholds::default().classify(concentration)
}
