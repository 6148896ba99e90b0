//! Channel-based data source.
//!
//! Receives snapshots via a tokio watch channel. Useful when embedding the
//! dashboard in a program that produces its own snapshots, and in tests.

use tokio::sync::watch;

use super::DataSource;
use crate::data::Snapshot;

/// A data source that receives snapshots pushed by someone else.
///
/// The watch channel only keeps the most recent value, so a slow reader
/// skips intermediate snapshots but never sees a partial one.
///
/// # Example
///
/// ```
/// use linewatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("plant-floor");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<Snapshot>>,
    description: String,
    closed: bool,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<Option<Snapshot>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            closed: false,
        }
    }

    /// Create a channel pair.
    ///
    /// Returns (sender, source); send `Some(snapshot)` to publish.
    pub fn create(source_description: &str) -> (watch::Sender<Option<Snapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        match self.receiver.has_changed() {
            Ok(true) => self.receiver.borrow_and_update().clone(),
            Ok(false) => None,
            Err(_) => {
                // Sender dropped
                self.closed = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        if self.closed {
            Some("Channel closed")
        } else {
            None
        }
    }
}
