//! Metric models and display helpers.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "2s", "500ms")
//!   and the simulated shift clock
//! - [`format`]: Compact number formatting for cards and charts
//! - [`model`]: Core data shapes ([`Snapshot`], [`ProductionLine`], [`Event`], ...)
//!
//! ## Data Flow
//!
//! ```text
//! Simulator::tick()
//!        │
//!        ▼
//!    Snapshot ──▶ DataSource::poll() ──▶ App::data ──▶ ui panels (read-only)
//! ```

pub mod duration;
pub mod format;
pub mod model;

pub use model::{
    DailyProductionPoint, DistributionSlice, Event, LineStatus, ProductionLine, ProductionSummary,
    Severity, Snapshot, Thresholds, TrendPoint,
};
