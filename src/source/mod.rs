//! Data source abstraction for receiving dashboard snapshots.
//!
//! The shell only ever sees whole [`Snapshot`]s through [`DataSource::poll`];
//! how they are produced (a scheduled simulator, an external channel) is
//! hidden behind the trait.

mod channel;
mod simulator;
mod ticker;

pub use channel::ChannelSource;
pub use simulator::{apportion, Simulator};
pub use ticker::{TickerSource, TickerState};

use std::fmt::Debug;

use crate::data::Snapshot;

/// Trait for receiving dashboard snapshots from various sources.
///
/// # Example
///
/// ```
/// use linewatch::{ChannelSource, DataSource};
///
/// let (_tx, mut source) = ChannelSource::create("example");
/// assert!(source.poll().is_none());
/// assert_eq!(source.description(), "channel: example");
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if a new snapshot is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the last error reported by the source, if any.
    fn error(&self) -> Option<&str>;

    /// Release any background resources. Called once when the shell exits.
    fn shutdown(&mut self) {}
}
