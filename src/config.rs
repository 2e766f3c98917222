//! Layered dashboard configuration.
//!
//! Settings are resolved in order, later layers winning:
//!
//! 1. Built-in defaults
//! 2. An optional config file (format inferred from the extension)
//! 3. Environment variables prefixed with `MICROPLASTICS_`, nested with `__`
//!    (e.g. `MICROPLASTICS_GENERATOR__READINGS=20`)
//! 4. Command-line flags, applied by the binary
//!
//! ```toml
//! [generator]
//! readings = 10
//! interval_secs = 60
//! seed = 42
//!
//! [alerts]
//! moderate = 100
//! high = 150
//!
//! [display]
//! theme = "dark"
//! refresh_secs = 0
//!
//! [export]
//! file_name = "microplastics.csv"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::AlertThresholds;
use crate::export::DEFAULT_FILE_NAME;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MICROPLASTICS";

/// Most readings a single page load may hold.
pub const MAX_READINGS: usize = 100_000;

/// Longest time span a page load may cover, oldest to newest reading (100 years).
pub const MAX_SPAN_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub generator: GeneratorConfig,
    pub alerts: AlertThresholds,
    pub display: DisplayConfig,
    pub export: ExportConfig,
}

/// Parameters of the simulated sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of readings per page load.
    pub readings: usize,
    /// Spacing between consecutive readings.
    pub interval_secs: u64,
    /// Inclusive lower bound for concentration (particles/L).
    pub concentration_min: u32,
    /// Exclusive upper bound for concentration (particles/L).
    pub concentration_max: u32,
    /// Inclusive lower bound for particle size (mm).
    pub particle_size_min: f64,
    /// Exclusive upper bound for particle size (mm).
    pub particle_size_max: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            readings: 10,
            interval_secs: 60,
            concentration_min: 50,
            concentration_max: 200,
            particle_size_min: 0.1,
            particle_size_max: 1.0,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Particle-size bounds as whole hundredths of a millimeter, `[lo, hi)`.
    pub fn particle_size_hundredths(&self) -> (u32, u32) {
        (
            (self.particle_size_min * 100.0).round() as u32,
            (self.particle_size_max * 100.0).round() as u32,
        )
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.readings > 0, "generator.readings must be at least 1");
        ensure!(
            self.readings <= MAX_READINGS,
            "generator.readings ({}) must not exceed {MAX_READINGS}",
            self.readings
        );
        ensure!(
            self.interval_secs > 0,
            "generator.interval_secs must be at least 1"
        );
        let span = self.interval_secs.checked_mul((self.readings - 1) as u64);
        let within_span = span.is_some_and(|span| span <= MAX_SPAN_SECS);
        ensure!(
            self.interval_secs <= MAX_SPAN_SECS && within_span,
            "generator.interval_secs ({}) over {} readings exceeds the {MAX_SPAN_SECS}s maximum span",
            self.interval_secs,
            self.readings
        );
        ensure!(
            self.concentration_min < self.concentration_max,
            "generator.concentration_min ({}) must be below concentration_max ({})",
            self.concentration_min,
            self.concentration_max
        );
        ensure!(
            self.particle_size_min.is_finite()
                && self.particle_size_max.is_finite()
                && self.particle_size_min >= 0.0,
            "generator particle sizes must be finite and non-negative"
        );
        let (lo, hi) = self.particle_size_hundredths();
        ensure!(
            lo < hi,
            "generator.particle_size_min ({}) must be at least 0.01 below particle_size_max ({})",
            self.particle_size_min,
            self.particle_size_max
        );
        Ok(())
    }
}

/// Terminal color scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: ThemeChoice,
    /// Regenerate the page every N seconds; 0 disables auto-refresh.
    pub refresh_secs: u64,
}

/// Where the download control writes its file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
    /// Target directory; the working directory when unset.
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            directory: None,
        }
    }
}

impl ExportConfig {
    /// Full path of the download target.
    pub fn target_path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(&self.file_name),
            None => PathBuf::from(&self.file_name),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("loading configuration")?
            .try_deserialize()
            .context("invalid configuration")?;
        Ok(config)
    }

    /// Check every section for values that cannot produce a dashboard.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        self.alerts.validate()?;
        ensure!(
            !self.export.file_name.trim().is_empty(),
            "export.file_name must not be empty"
        );
        Ok(())
    }
}
