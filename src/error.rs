//! Error types for configuration and data source lifecycle.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while validating dashboard configuration.
///
/// All of these are detected when a simulator or ticker is constructed;
/// once a source is running, generating a snapshot cannot fail.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The tick interval must be strictly positive.
    #[error("tick interval must be greater than zero (got {0:?})")]
    NonPositiveInterval(Duration),

    /// The event feed needs room for at least one event.
    #[error("max_events must be at least 1")]
    ZeroMaxEvents,

    /// At least one production line is required.
    #[error("at least one production line is required")]
    NoLines,

    /// The distribution needs at least one category.
    #[error("distribution categories must not be empty")]
    NoCategories,

    /// A `[min, max]` band is inverted, or an edge is non-finite or out of range.
    #[error("invalid {name} band [{min}, {max}]: edges must be ordered, finite and within ±1e12")]
    InvertedBand {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A jitter/step value was negative, NaN, infinite or too large to sample.
    #[error("{name} must be a finite number within [0, {max}] (got {value})")]
    InvalidStep {
        name: &'static str,
        value: f64,
        max: f64,
    },

    /// An integer step or ceiling exceeds what the simulator can add safely.
    #[error("{name} must be at most {max} (got {value})")]
    CountTooLarge {
        name: &'static str,
        value: u64,
        max: u64,
    },

    /// Event probability outside `[0, 1]`.
    #[error("event_probability must be within [0, 1] (got {0})")]
    InvalidProbability(f64),

    /// Warning threshold must not exceed the critical threshold.
    #[error("scrap warning threshold {warning}% exceeds critical threshold {critical}%")]
    InvertedThresholds { warning: f64, critical: f64 },

    /// A duration string could not be parsed.
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
}

/// Errors raised by misuse of a data source lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// `start` was called on a source whose task is already running.
    #[error("data source is already running")]
    AlreadyRunning,

    /// `start` was called after the source was stopped.
    #[error("data source has been stopped")]
    Stopped,
}
