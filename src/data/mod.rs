//! Data models and processing for sensor readings.
//!
//! This module turns raw readings into classified, display-ready data.
//!
//! ## Submodules
//!
//! - [`alert`]: Three-level alert classification ([`Alert`], [`AlertThresholds`])
//! - [`histogram`]: Equal-width binning for the particle-size distribution
//! - [`reading`]: Core records ([`Reading`], [`Dataset`])
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Reading> (from a ReadingSource)
//!        │
//!        ▼
//! Dataset::new(readings, &thresholds)
//!        │
//!        └──▶ alerts[i] = thresholds.classify(readings[i].concentration)
//! ```

pub mod alert;
pub mod histogram;
pub mod reading;

pub use alert::{classify, Alert, AlertThresholds};
pub use histogram::{histogram, Bin};
pub use reading::{Dataset, Reading};
