//! Dashboard configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LINEWATCH_*` environment variables (nested keys joined with `__`, e.g.
//! `LINEWATCH_SIMULATION__SEED=7`). Command-line flags are applied last by
//! the binary.
//!
//! ```toml
//! theme = "light"
//!
//! [simulation]
//! tick_interval = "1500ms"
//! seed = 42
//! max_events = 10
//!
//! [simulation.trend_band]
//! min = 70.0
//! max = 130.0
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::Thresholds;
use crate::error::ConfigError;

/// Initial colour scheme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    /// Pick from the terminal background luminance.
    Auto,
}

/// Largest magnitude accepted for float steps and band edges.
pub const MAX_MAGNITUDE: f64 = 1e12;
/// Largest scrap step or ceiling; their sum stays within `i64`.
pub const MAX_SCRAP_COUNT: u64 = (i64::MAX / 2) as u64;

/// An inclusive `[min, max]` range a simulated value is kept within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_MAGNITUDE;
        if !in_range(self.min) || !in_range(self.max) || self.min > self.max {
            return Err(ConfigError::InvertedBand {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Tunables for the simulated telemetry.
///
/// The defaults produce a plausible-looking three-line plant; none of the
/// numbers are meaningful beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time between ticks.
    #[serde(with = "crate::data::duration::human")]
    pub tick_interval: Duration,
    /// Fixed RNG seed for reproducible runs; random when unset.
    pub seed: Option<u64>,
    /// Number of production lines.
    pub lines: u32,
    /// Event feed capacity; older events are evicted.
    pub max_events: usize,
    /// Upper bound on units added to a line's total per tick.
    pub total_max_delta: u64,
    /// Maximum drift of a line's weekly average per tick.
    pub average_jitter: f64,
    /// Maximum change in a line's scrap count per tick.
    pub scrap_max_delta: u64,
    /// Scrap count never exceeds this.
    pub scrap_ceiling: u64,
    pub scrap_average_jitter: f64,
    pub trend_band: Band,
    pub trend_target: f64,
    pub trend_max_step: f64,
    pub daily_band: Band,
    pub daily_max_step: f64,
    pub distribution_categories: Vec<String>,
    pub distribution_max_step: u32,
    /// Chance of a random event on a tick with no status change.
    pub event_probability: f64,
    pub thresholds: Thresholds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(2),
            seed: None,
            lines: 3,
            max_events: 8,
            total_max_delta: 25,
            average_jitter: 4.0,
            scrap_max_delta: 2,
            scrap_ceiling: 60,
            scrap_average_jitter: 0.1,
            trend_band: Band::new(80.0, 120.0),
            trend_target: 100.0,
            trend_max_step: 4.0,
            daily_band: Band::new(1_800.0, 2_600.0),
            daily_max_step: 60.0,
            distribution_categories: vec![
                "Housings".to_string(),
                "Brackets".to_string(),
                "Fasteners".to_string(),
                "Panels".to_string(),
            ],
            distribution_max_step: 3,
            event_probability: 0.35,
            thresholds: Thresholds::default(),
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the simulator cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval(self.tick_interval));
        }
        if self.max_events == 0 {
            return Err(ConfigError::ZeroMaxEvents);
        }
        if self.lines == 0 {
            return Err(ConfigError::NoLines);
        }
        if self.distribution_categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        self.trend_band.validate("trend")?;
        self.daily_band.validate("daily")?;
        if self.daily_band.min < 0.0 {
            return Err(ConfigError::InvertedBand {
                name: "daily",
                min: self.daily_band.min,
                max: self.daily_band.max,
            });
        }

        for (name, value) in [
            ("average_jitter", self.average_jitter),
            ("scrap_average_jitter", self.scrap_average_jitter),
            ("trend_max_step", self.trend_max_step),
            ("daily_max_step", self.daily_max_step),
            ("trend_target", self.trend_target),
        ] {
            if !value.is_finite() || !(0.0..=MAX_MAGNITUDE).contains(&value) {
                return Err(ConfigError::InvalidStep {
                    name,
                    value,
                    max: MAX_MAGNITUDE,
                });
            }
        }

        for (name, value) in [
            ("scrap_max_delta", self.scrap_max_delta),
            ("scrap_ceiling", self.scrap_ceiling),
        ] {
            if value > MAX_SCRAP_COUNT {
                return Err(ConfigError::CountTooLarge {
                    name,
                    value,
                    max: MAX_SCRAP_COUNT,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.event_probability) {
            return Err(ConfigError::InvalidProbability(self.event_probability));
        }

        let t = &self.thresholds;
        if !t.scrap_rate_warning.is_finite()
            || !t.scrap_rate_critical.is_finite()
            || t.scrap_rate_warning > t.scrap_rate_critical
        {
            return Err(ConfigError::InvertedThresholds {
                warning: t.scrap_rate_warning,
                critical: t.scrap_rate_critical,
            });
        }

        Ok(())
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub theme: ThemeMode,
    pub simulation: SimulationConfig,
}

impl DashboardConfig {
    /// Load configuration from an optional file plus `LINEWATCH_*` environment variables.
    ///
    /// The result is not validated here: CLI overrides are applied afterwards,
    /// and validation happens when the data source is built.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("LINEWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("simulation.distribution_categories"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
