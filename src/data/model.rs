//! Metric data shapes shown on the dashboard.
//!
//! A [`Snapshot`] is the unit of exchange between the data source and the
//! view layer: it is always produced whole and replaced whole.

use serde::{Deserialize, Serialize};

/// Scrap-rate thresholds (percent of weekly average) used to derive a line's status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Scrap rate at or above which a line needs attention.
    pub scrap_rate_warning: f64,
    /// Scrap rate at or above which a line is critical.
    pub scrap_rate_critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            scrap_rate_warning: 1.0,
            scrap_rate_critical: 2.0,
        }
    }
}

/// Operating status of a production line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Running,
    Attention,
    Critical,
}

impl LineStatus {
    /// Classify a scrap rate (percent) against the thresholds.
    pub fn from_scrap_rate(rate: f64, thresholds: &Thresholds) -> Self {
        if rate >= thresholds.scrap_rate_critical {
            LineStatus::Critical
        } else if rate >= thresholds.scrap_rate_warning {
            LineStatus::Attention
        } else {
            LineStatus::Running
        }
    }

    /// Short status label for cards.
    pub fn label(&self) -> &'static str {
        match self {
            LineStatus::Running => "Running",
            LineStatus::Attention => "Attention",
            LineStatus::Critical => "Critical",
        }
    }
}

/// Current figures for one production line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    /// 1-based line number.
    pub number: u32,
    /// Cumulative units produced.
    pub total: u64,
    pub weekly_average: f64,
    /// Current scrap count; never negative.
    pub scrap: u64,
    pub scrap_average: f64,
    pub status: LineStatus,
}

impl ProductionLine {
    /// Scrap as a percentage of the weekly average output.
    pub fn scrap_rate(&self) -> f64 {
        if self.weekly_average > 0.0 {
            self.scrap as f64 / self.weekly_average * 100.0
        } else {
            0.0
        }
    }
}

/// One hourly point of the production trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub actual: f64,
    pub target: f64,
}

/// Output for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProductionPoint {
    pub day: String,
    pub output: u64,
}

/// A category's share of production, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub label: String,
    pub share: u32,
}

/// Severity of a feed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

impl Severity {
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "OK",
            Severity::Warning => "WARN",
            Severity::Critical => "CRIT",
        }
    }
}

/// An entry in the event feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonically increasing id; newer events have larger ids.
    pub id: u64,
    /// Simulated time of the event, in milliseconds since the source started.
    pub at_ms: u64,
    pub severity: Severity,
    pub message: String,
}

/// Aggregate figures across all lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub total: u64,
    pub weekly_average: f64,
    pub scrap: u64,
    pub scrap_average: f64,
}

impl ProductionSummary {
    /// Plant-wide scrap as a percentage of summed weekly averages.
    pub fn scrap_rate(&self) -> f64 {
        if self.weekly_average > 0.0 {
            self.scrap as f64 / self.weekly_average * 100.0
        } else {
            0.0
        }
    }
}

/// The complete set of metric values at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0 for the seed snapshot, incremented on every tick.
    pub sequence: u64,
    /// Simulated clock in milliseconds.
    pub elapsed_ms: u64,
    pub lines: Vec<ProductionLine>,
    pub trend: Vec<TrendPoint>,
    pub daily: Vec<DailyProductionPoint>,
    pub distribution: Vec<DistributionSlice>,
    /// Most recent first.
    pub events: Vec<Event>,
}

impl Snapshot {
    /// Sum line figures the way the summary card presents them.
    pub fn summary(&self) -> ProductionSummary {
        self.lines.iter().fold(
            ProductionSummary {
                total: 0,
                weekly_average: 0.0,
                scrap: 0,
                scrap_average: 0.0,
            },
            |acc, line| ProductionSummary {
                total: acc.total + line.total,
                weekly_average: acc.weekly_average + line.weekly_average,
                scrap: acc.scrap + line.scrap,
                scrap_average: acc.scrap_average + line.scrap_average,
            },
        )
    }

    /// Find a line by its number.
    pub fn line(&self, number: u32) -> Option<&ProductionLine> {
        self.lines.iter().find(|l| l.number == number)
    }

    /// Sum of distribution shares (100 for any well-formed snapshot).
    pub fn distribution_total(&self) -> u32 {
        self.distribution.iter().map(|s| s.share).sum()
    }

    /// Worst status across all lines.
    pub fn worst_status(&self) -> Option<LineStatus> {
        self.lines.iter().map(|l| l.status).max()
    }
}
