//! Simulated microplastic sensor.
//!
//! Produces timestamped readings with uniformly sampled concentration and
//! particle size. The random-number generator is injected so tests and
//! `--seed` runs get reproducible output.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ReadingSource;
use crate::config::GeneratorConfig;
use crate::data::Reading;

/// A reading source that samples synthetic data.
///
/// Readings end at the `now` passed to [`SimulatedSensor::generate`] and are
/// spaced `interval_secs` apart, oldest first.
#[derive(Debug)]
pub struct SimulatedSensor<R = StdRng> {
    rng: R,
    config: GeneratorConfig,
    description: String,
}

impl SimulatedSensor<StdRng> {
    /// Create a sensor backed by `StdRng`, seeded from `seed` or OS entropy.
    pub fn seeded(config: GeneratorConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sensor = Self::new(rng, config);
        if let Some(seed) = seed {
            sensor.description = format!("{} (seed {seed})", sensor.description);
        }
        sensor
    }
}

impl<R: Rng> SimulatedSensor<R> {
    /// Create a sensor drawing from the given random-number generator.
    pub fn new(rng: R, config: GeneratorConfig) -> Self {
        let description = format!("simulated: {} readings", config.readings);
        Self {
            rng,
            config,
            description,
        }
    }

    /// Sample `config.readings` readings ending at `now`.
    ///
    /// Timestamps are `now - (n-1)*interval, ..., now - interval, now`.
    /// Particle sizes are drawn as whole hundredths so they always carry
    /// two decimals and stay below the configured maximum.
    ///
    /// Fails when the oldest timestamp cannot be represented.
    pub fn generate(&mut self, now: NaiveDateTime) -> Result<Vec<Reading>> {
        let count = self.config.readings;
        let interval = i64::try_from(self.config.interval_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .with_context(|| {
                format!("interval of {}s is out of range", self.config.interval_secs)
            })?;
        let (size_lo, size_hi) = self.config.particle_size_hundredths();

        let mut readings = Vec::with_capacity(count);
        for i in 0..count {
            let steps_back = i32::try_from(count - 1 - i)
                .with_context(|| format!("{count} readings is too many"))?;
            let timestamp = interval
                .checked_mul(steps_back)
                .and_then(|back| now.checked_sub_signed(back))
                .with_context(|| format!("reading {} would predate the calendar", i + 1))?;
            let concentration = self
                .rng
                .gen_range(self.config.concentration_min..self.config.concentration_max);
            let particle_size = self.rng.gen_range(size_lo..size_hi) as f64 / 100.0;
            readings.push(Reading {
                timestamp,
                concentration,
                particle_size,
            });
        }
        Ok(readings)
    }
}

impl<R: Rng + Send + std::fmt::Debug> ReadingSource for SimulatedSensor<R> {
    fn load(&mut self, now: NaiveDateTime) -> Result<Vec<Reading>> {
        self.generate(now)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 22)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_generates_configured_count() {
        for readings in [1, 10, 37] {
            let config = GeneratorConfig {
                readings,
                ..Default::default()
            };
            let mut sensor = SimulatedSensor::seeded(config, Some(1));
            assert_eq!(sensor.generate(now()).unwrap().len(), readings);
        }
    }

    #[test]
    fn test_timestamps_one_minute_apart_ending_now() {
        let mut sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(3));
        let readings = sensor.generate(now()).unwrap();

        assert_eq!(readings.last().unwrap().timestamp, now());
        assert_eq!(
            readings.first().unwrap().timestamp,
            now() - Duration::minutes(9)
        );
        for pair in readings.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(1));
        }
    }

    #[test]
    fn test_values_within_ranges() {
        let config = GeneratorConfig {
            readings: 500,
            ..Default::default()
        };
        let mut sensor = SimulatedSensor::seeded(config, Some(11));
        for reading in sensor.generate(now()).unwrap() {
            assert!((50..200).contains(&reading.concentration));
            assert!(reading.particle_size >= 0.1 && reading.particle_size < 1.0);
            let rounded = (reading.particle_size * 100.0).round() / 100.0;
            assert!((rounded - reading.particle_size).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = SimulatedSensor::seeded(GeneratorConfig::default(), Some(99));
        let mut b = SimulatedSensor::seeded(GeneratorConfig::default(), Some(99));
        assert_eq!(a.generate(now()).unwrap(), b.generate(now()).unwrap());
    }

    #[test]
    fn test_injected_rng() {
        let rng = StdRng::seed_from_u64(5);
        let mut sensor = SimulatedSensor::new(rng, GeneratorConfig::default());
        assert_eq!(sensor.generate(now()).unwrap().len(), 10);
        assert_eq!(sensor.description(), "simulated: 10 readings");
    }

    #[test]
    fn test_fixed_concentration_range() {
        let config = GeneratorConfig {
            concentration_min: 120,
            concentration_max: 121,
            ..Default::default()
        };
        let mut sensor = SimulatedSensor::seeded(config, None);
        let readings = sensor.load(now()).unwrap();
        assert!(readings.iter().all(|r| r.concentration == 120));
    }

    #[test]
    fn test_interval_beyond_i64_is_rejected() {
        let config = GeneratorConfig {
            interval_secs: u64::MAX,
            ..Default::default()
        };
        let mut sensor = SimulatedSensor::seeded(config, Some(4));
        let err = sensor.generate(now()).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_span_before_calendar_start_is_rejected() {
        let config = GeneratorConfig {
            interval_secs: 1_000_000_000_000,
            ..Default::default()
        };
        let mut sensor = SimulatedSensor::seeded(config, Some(4));
        let err = sensor.load(now()).unwrap_err();
        assert!(err.to_string().contains("predate"));
    }

    #[test]
    fn test_seed_in_description() {
        let sensor = SimulatedSensor::seeded(GeneratorConfig::default(), Some(42));
        assert_eq!(sensor.description(), "simulated: 10 readings (seed 42)");
    }
}
