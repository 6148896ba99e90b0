//! # linewatch
//!
//! A terminal operations dashboard for a manufacturing plant, fed by a
//! deterministic production simulator.
//!
//! The crate renders per-line throughput cards, an hourly trend, daily output,
//! a product distribution, a plant summary and an event feed. Metric values
//! are refreshed on a fixed interval by a background ticker that perturbs the
//! previous snapshot within configured bounds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │ (model)  │    │(panels) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── TickerSource(Simulator) | ChannelSource     │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, line selection, theme toggle and export
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait), the
//!   [`Simulator`] and the interval-driven [`TickerSource`]
//! - **[`data`]**: Snapshot model plus duration and number formatting
//! - **[`config`]**: Layered configuration (file, environment, CLI)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Tick every second with a fixed seed
//! linewatch --interval 1s --seed 42
//!
//! # Run 30 ticks headless and write the result as JSON
//! linewatch --export out.json --ticks 30
//! ```
//!
//! ### As a library with the simulator
//!
//! ```
//! use linewatch::{SimulationConfig, Simulator};
//!
//! let mut sim = Simulator::new(SimulationConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! })
//! .unwrap();
//! let next = sim.tick();
//! assert_eq!(next.sequence, 1);
//! assert_eq!(next.distribution_total(), 100);
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use linewatch::{App, ChannelSource, Theme};
//!
//! // Create a channel for receiving snapshots
//! let (tx, source) = ChannelSource::create("plant-floor");
//!
//! // Create the app
//! let app = App::new(Box::new(source), Theme::dark());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{Band, DashboardConfig, SimulationConfig, ThemeMode};
pub use data::{
    DailyProductionPoint, DistributionSlice, Event, LineStatus, ProductionLine, ProductionSummary,
    Severity, Snapshot, Thresholds, TrendPoint,
};
pub use error::{ConfigError, SourceError};
pub use source::{ChannelSource, DataSource, Simulator, TickerSource, TickerState};
pub use ui::Theme;
