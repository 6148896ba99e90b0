//! Scheduled simulator source.
//!
//! Runs a [`Simulator`] on a tokio interval and publishes every snapshot
//! through a watch channel. The task has an explicit lifecycle:
//!
//! ```text
//! Idle ──start()──▶ Running ──stop()/drop──▶ Stopped
//!  │                  ↺ tick                    ▲
//!  └──────────────────stop()────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{DataSource, Simulator};
use crate::config::SimulationConfig;
use crate::data::duration::format_duration;
use crate::data::Snapshot;
use crate::error::{ConfigError, SourceError};

/// Lifecycle state of a [`TickerSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerState {
    /// Seed snapshot available, no task spawned yet.
    Idle,
    /// Background task is ticking.
    Running,
    /// Task released; no further snapshots will be delivered.
    Stopped,
}

/// A data source that ticks a simulator on a fixed interval.
///
/// [`start`](TickerSource::start) must be called from within a tokio runtime.
///
/// # Example
///
/// ```
/// use linewatch::{DataSource, SimulationConfig, TickerSource};
///
/// # tokio_test::block_on(async {
/// let mut source = TickerSource::new(SimulationConfig::default()).unwrap();
/// let seed = source.poll().unwrap();
/// assert_eq!(seed.sequence, 0);
///
/// source.start().unwrap();
/// source.stop();
/// # });
/// ```
#[derive(Debug)]
pub struct TickerSource {
    /// Moved into the task on start.
    pending: Option<Simulator>,
    /// Shared with the task; emptied by `stop` so nothing is published afterwards.
    sender: Arc<Mutex<Option<watch::Sender<Snapshot>>>>,
    receiver: watch::Receiver<Snapshot>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
    state: TickerState,
    description: String,
    initial_returned: bool,
}

impl TickerSource {
    /// Validate the configuration and build the seed snapshot.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_simulator(Simulator::new(config)?))
    }

    /// Wrap an existing simulator.
    pub fn from_simulator(simulator: Simulator) -> Self {
        let period = simulator.config().tick_interval;
        let (tx, rx) = watch::channel(simulator.snapshot().clone());
        Self {
            pending: Some(simulator),
            sender: Arc::new(Mutex::new(Some(tx))),
            receiver: rx,
            period,
            handle: None,
            state: TickerState::Idle,
            description: format!("simulated: every {}", format_duration(period)),
            initial_returned: false,
        }
    }

    pub fn state(&self) -> TickerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Subscribe to snapshot updates directly.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.receiver.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Snapshot {
        self.receiver.borrow().clone()
    }

    /// Spawn the ticking task.
    pub fn start(&mut self) -> Result<(), SourceError> {
        match self.state {
            TickerState::Running => return Err(SourceError::AlreadyRunning),
            TickerState::Stopped => return Err(SourceError::Stopped),
            TickerState::Idle => {}
        }
        let Some(mut simulator) = self.pending.take() else {
            return Err(SourceError::Stopped);
        };

        let period = self.period;
        let slot = Arc::clone(&self.sender);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let snapshot = simulator.tick().clone();
                let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
                let Some(sender) = guard.as_ref() else {
                    debug!("ticker stopped mid-tick, snapshot discarded");
                    break;
                };
                if sender.send(snapshot).is_err() {
                    debug!("all receivers dropped, ticker exiting");
                    break;
                }
            }
        }));
        self.state = TickerState::Running;

        info!(period = %format_duration(period), "ticker started");
        Ok(())
    }

    /// Close the channel and abort the task. Safe to call more than once.
    ///
    /// Once this returns no further snapshot is published, even by a tick
    /// that was already in progress on another worker thread.
    pub fn stop(&mut self) {
        self.close_channel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("ticker stopped");
        }
        self.pending = None;
        self.state = TickerState::Stopped;
    }

    fn close_channel(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl DataSource for TickerSource {
    fn poll(&mut self) -> Option<Snapshot> {
        if self.state == TickerState::Stopped {
            return None;
        }

        // Return the seed on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            Ok(false) => None,
            Err(_) => {
                warn!("ticker channel closed unexpectedly");
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }

    fn shutdown(&mut self) {
        self.stop();
    }
}

impl Drop for TickerSource {
    fn drop(&mut self) {
        self.close_channel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(500);

    fn config() -> SimulationConfig {
        SimulationConfig {
            seed: Some(17),
            tick_interval: PERIOD,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_zero_interval() {
        let result = TickerSource::new(SimulationConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        });
        assert!(matches!(result, Err(ConfigError::NonPositiveInterval(_))));
    }

    #[test]
    fn test_idle_source_yields_seed_once() {
        let mut source = TickerSource::new(config()).unwrap();
        assert_eq!(source.state(), TickerState::Idle);
        assert_eq!(source.description(), "simulated: every 500ms");

        assert_eq!(source.poll().map(|s| s.sequence), Some(0));
        assert!(source.poll().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_source_ticks_on_interval() {
        let mut source = TickerSource::new(config()).unwrap();
        let _ = source.poll();
        source.start().unwrap();
        assert_eq!(source.state(), TickerState::Running);

        tokio::time::sleep(PERIOD / 2).await;
        assert!(source.poll().is_none(), "no tick before the first period");

        tokio::time::sleep(PERIOD * 3).await;
        let latest = source.poll().expect("ticks should have been published");
        assert_eq!(latest.sequence, 3);
        assert_eq!(latest.elapsed_ms, 1_500);
        assert!(source.poll().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_every_tick() {
        let mut source = TickerSource::new(config()).unwrap();
        let mut rx = source.subscribe();
        source.start().unwrap();

        for expected in 1..=3 {
            rx.changed().await.unwrap();
            assert_eq!(rx.borrow_and_update().sequence, expected);
        }
        source.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_releases_task_and_halts_updates() {
        let mut source = TickerSource::new(config()).unwrap();
        source.start().unwrap();
        tokio::time::sleep(PERIOD + PERIOD / 2).await;
        let _ = source.poll();

        source.stop();
        assert_eq!(source.state(), TickerState::Stopped);
        assert!(source.handle.is_none());
        let frozen = source.latest().sequence;

        tokio::time::sleep(PERIOD * 4).await;
        assert!(source.poll().is_none());
        assert_eq!(source.latest().sequence, frozen);

        // Stopping again is harmless
        source.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_subscribers_see_channel_close_after_stop() {
        let mut source = TickerSource::new(SimulationConfig {
            tick_interval: Duration::from_millis(1),
            ..config()
        })
        .unwrap();
        let mut rx = source.subscribe();
        source.start().unwrap();
        rx.changed().await.unwrap();

        source.stop();
        let frozen = rx.borrow_and_update().sequence;

        // Nothing published after stop: the next wait reports a closed channel
        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().sequence, frozen);
        assert_eq!(source.latest().sequence, frozen);
    }

    #[tokio::test]
    async fn test_lifecycle_misuse() {
        let mut source = TickerSource::new(config()).unwrap();
        source.start().unwrap();
        assert_eq!(source.start(), Err(SourceError::AlreadyRunning));

        source.shutdown();
        assert_eq!(source.start(), Err(SourceError::Stopped));
    }

    #[test]
    fn test_stop_before_start() {
        let mut source = TickerSource::new(config()).unwrap();
        source.stop();
        assert_eq!(source.state(), TickerState::Stopped);
        assert!(source.poll().is_none());
        assert_eq!(source.start(), Err(SourceError::Stopped));
    }
}
