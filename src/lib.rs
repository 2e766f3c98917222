//! # microplastic-dashboard
//!
//! A terminal dashboard for a (simulated) microplastic detection sensor.
//!
//! Every page load draws a fresh batch of readings, classifies each
//! concentration into an alert level, and renders a single page: headline
//! KPIs for the latest reading, a concentration line chart, a particle-size
//! histogram, the full reading table and a CSV download.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐  │
//! │  │ source  │──▶│   data   │──▶│ dashboard │──▶│    ui    │  │
//! │  │(readings)   │ (alerts) │   │(view model)   │(painting)│  │
//! │  └─────────┘   └──────────┘   └─────┬─────┘   └──────────┘  │
//! │       ▲                             │                        │
//! │       │                             ▼                        │
//! │  SimulatedSensor | CsvFileSource  export (CSV download)      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Reading sources ([`ReadingSource`] trait): the seeded
//!   [`SimulatedSensor`] and [`CsvFileSource`] for replaying downloads
//! - **[`data`]**: [`Reading`] records, the alert classifier and the
//!   [`Dataset`] holding readings with their parallel alert column
//! - **[`dashboard`]**: Pure [`render`] from a dataset to a [`DashboardView`]
//! - **[`export`]**: CSV building, writing and parsing
//! - **[`config`]**: Layered configuration (file, environment, flags)
//! - **[`app`]** / **[`events`]** / **[`ui`]**: The interactive terminal page
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive page with reproducible readings
//! microplastic-dashboard --seed 42
//!
//! # Headless: write the CSV download and exit
//! microplastic-dashboard --export microplastics.csv
//!
//! # Headless: print the rendered page model as JSON
//! microplastic-dashboard --json
//! ```
//!
//! ### As a library
//!
//! ```
//! use chrono::NaiveDate;
//! use microplastic_dashboard::config::GeneratorConfig;
//! use microplastic_dashboard::{render, AlertThresholds, Dataset, SimulatedSensor};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 6, 1)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//!
//! let mut sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(7));
//! let dataset = Dataset::new(sensor.generate(now)?, &AlertThresholds::default());
//! let view = render(&dataset);
//!
//! assert_eq!(view.table.rows.len(), 10);
//! assert_eq!(view.download.file_name, "microplastics.csv");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod events;
pub mod export;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use dashboard::{render, DashboardView};
pub use data::{classify, Alert, AlertThresholds, Dataset, Reading};
pub use source::{CsvFileSource, ReadingSource, SimulatedSensor};
