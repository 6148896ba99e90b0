//! Seeded telemetry simulator.
//!
//! Owns the current [`Snapshot`] and derives each successor by applying
//! bounded random deltas. Given the same seed and configuration the
//! sequence of snapshots is identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::data::{
    DailyProductionPoint, DistributionSlice, Event, LineStatus, ProductionLine, Severity,
    Snapshot, TrendPoint,
};
use crate::error::ConfigError;

const TREND_HOURS: std::ops::RangeInclusive<u32> = 8..=19;
const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
/// Distribution weights are kept within this range before apportioning.
const WEIGHT_MIN: i64 = 1;
const WEIGHT_MAX: i64 = 100;

/// Generates and perturbs dashboard snapshots.
///
/// # Example
///
/// ```
/// use linewatch::{SimulationConfig, Simulator};
///
/// let config = SimulationConfig { seed: Some(7), ..Default::default() };
/// let mut sim = Simulator::new(config).unwrap();
/// assert_eq!(sim.snapshot().sequence, 0);
///
/// let next = sim.tick();
/// assert_eq!(next.sequence, 1);
/// assert_eq!(next.distribution_total(), 100);
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    rng: StdRng,
    snapshot: Snapshot,
    /// Raw distribution weights; the snapshot only carries apportioned shares.
    weights: Vec<u32>,
    next_event_id: u64,
}

impl Simulator {
    /// Validate the configuration and build a seed snapshot.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = make_rng(config.seed);
        let weights: Vec<u32> = config
            .distribution_categories
            .iter()
            .map(|_| rng.gen_range(10..=40))
            .collect();
        let snapshot = seed_snapshot(&config, &weights, &mut rng);
        let next_event_id = next_id(&snapshot.events);

        debug!(
            lines = snapshot.lines.len(),
            seed = ?config.seed,
            "simulator initialised"
        );

        Ok(Self {
            config,
            rng,
            snapshot,
            weights,
            next_event_id,
        })
    }

    /// Start from a caller-supplied snapshot instead of generated baselines.
    ///
    /// Statuses are recomputed against the configured thresholds, the event
    /// list is trimmed to `max_events`, and an empty distribution is filled
    /// with the configured categories in equal parts.
    pub fn with_snapshot(
        config: SimulationConfig,
        mut snapshot: Snapshot,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if snapshot.lines.is_empty() {
            return Err(ConfigError::NoLines);
        }

        for line in &mut snapshot.lines {
            line.status = LineStatus::from_scrap_rate(line.scrap_rate(), &config.thresholds);
        }
        snapshot.events.truncate(config.max_events);

        let weights: Vec<u32> = if snapshot.distribution.is_empty() {
            vec![1; config.distribution_categories.len()]
        } else {
            snapshot.distribution.iter().map(|s| s.share.max(1)).collect()
        };
        let labels: Vec<String> = if snapshot.distribution.is_empty() {
            config.distribution_categories.clone()
        } else {
            snapshot.distribution.iter().map(|s| s.label.clone()).collect()
        };
        snapshot.distribution = build_distribution(&labels, &weights);

        let next_event_id = next_id(&snapshot.events);
        Ok(Self {
            rng: make_rng(config.seed),
            config,
            snapshot,
            weights,
            next_event_id,
        })
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Advance by one tick and return the new snapshot.
    ///
    /// The successor is built in full before it replaces the current value.
    pub fn tick(&mut self) -> &Snapshot {
        let cfg = &self.config;
        let rng = &mut self.rng;
        let mut next = self.snapshot.clone();

        next.sequence += 1;
        next.elapsed_ms = next
            .elapsed_ms
            .saturating_add(cfg.tick_interval.as_millis() as u64);

        let mut transitions = Vec::new();
        for line in &mut next.lines {
            line.total = line
                .total
                .saturating_add(rng.gen_range(0..=cfg.total_max_delta));
            line.weekly_average = (line.weekly_average + jitter(rng, cfg.average_jitter)).max(0.0);

            let delta = cfg.scrap_max_delta as i64;
            let scrap = line.scrap as i64 + rng.gen_range(-delta..=delta);
            line.scrap = scrap.clamp(0, cfg.scrap_ceiling as i64) as u64;
            line.scrap_average =
                (line.scrap_average + jitter(rng, cfg.scrap_average_jitter)).max(0.0);

            let status = LineStatus::from_scrap_rate(line.scrap_rate(), &cfg.thresholds);
            if status != line.status {
                transitions.push((line.number, line.status, status));
            }
            line.status = status;
        }

        for point in &mut next.trend {
            point.actual = cfg
                .trend_band
                .clamp(point.actual + jitter(rng, cfg.trend_max_step));
            point.target = cfg.trend_target;
        }

        for point in &mut next.daily {
            let moved = point.output as f64 + jitter(rng, cfg.daily_max_step);
            point.output = cfg.daily_band.clamp(moved).round() as u64;
        }

        let step = cfg.distribution_max_step as i64;
        for weight in &mut self.weights {
            let moved = *weight as i64 + rng.gen_range(-step..=step);
            *weight = moved.clamp(WEIGHT_MIN, WEIGHT_MAX) as u32;
        }
        let labels: Vec<String> = next.distribution.iter().map(|s| s.label.clone()).collect();
        next.distribution = build_distribution(&labels, &self.weights);

        let event = if let Some(&(number, from, to)) = transitions.first() {
            info!(line = number, from = from.label(), to = to.label(), "line status changed");
            Some((
                severity_for(to),
                format!("Line {} status changed: {} → {}", number, from.label(), to.label()),
            ))
        } else if rng.gen_bool(cfg.event_probability) {
            Some(random_event(rng, &next.lines))
        } else {
            None
        };

        if let Some((severity, message)) = event {
            next.events.insert(
                0,
                Event {
                    id: self.next_event_id,
                    at_ms: next.elapsed_ms,
                    severity,
                    message,
                },
            );
            self.next_event_id += 1;
            next.events.truncate(cfg.max_events);
        }

        debug!(sequence = next.sequence, events = next.events.len(), "tick");
        self.snapshot = next;
        &self.snapshot
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn jitter(rng: &mut StdRng, max: f64) -> f64 {
    rng.gen_range(-max..=max)
}

fn next_id(events: &[Event]) -> u64 {
    events.iter().map(|e| e.id).max().map_or(0, |id| id + 1)
}

fn severity_for(status: LineStatus) -> Severity {
    match status {
        LineStatus::Running => Severity::Success,
        LineStatus::Attention => Severity::Warning,
        LineStatus::Critical => Severity::Critical,
    }
}

fn random_event(rng: &mut StdRng, lines: &[ProductionLine]) -> (Severity, String) {
    let line = lines
        .get(rng.gen_range(0..lines.len()))
        .map_or(1, |l| l.number);

    match rng.gen_range(0..6) {
        0 => (Severity::Info, format!("Line {}: shift handover logged", line)),
        1 => (Severity::Success, format!("Line {}: hourly target reached", line)),
        2 => (
            Severity::Info,
            format!("Material batch #{} received", rng.gen_range(1000..10000)),
        ),
        3 => (
            Severity::Warning,
            format!("Line {}: conveyor speed deviation detected", line),
        ),
        4 => (Severity::Info, format!("Quality check passed on line {}", line)),
        _ => (
            Severity::Warning,
            format!("Line {}: tooling wear approaching limit", line),
        ),
    }
}

fn seed_snapshot(config: &SimulationConfig, weights: &[u32], rng: &mut StdRng) -> Snapshot {
    let lines = (1..=config.lines)
        .map(|number| {
            let mut line = ProductionLine {
                number,
                total: rng.gen_range(8_000..=15_000),
                weekly_average: rng.gen_range(1_500.0..=2_100.0),
                scrap: rng.gen_range(0..=config.scrap_ceiling.min(20)),
                scrap_average: rng.gen_range(1.0..=4.0),
                status: LineStatus::Running,
            };
            line.status = LineStatus::from_scrap_rate(line.scrap_rate(), &config.thresholds);
            line
        })
        .collect();

    let trend = TREND_HOURS
        .map(|hour| TrendPoint {
            label: format!("{:02}:00", hour),
            actual: rng.gen_range(config.trend_band.min..=config.trend_band.max),
            target: config.trend_target,
        })
        .collect();

    let daily = DAYS
        .iter()
        .map(|day| DailyProductionPoint {
            day: (*day).to_string(),
            output: rng
                .gen_range(config.daily_band.min..=config.daily_band.max)
                .round() as u64,
        })
        .collect();

    let distribution = build_distribution(&config.distribution_categories, weights);

    let mut events: Vec<Event> = [
        (Severity::Info, "Shift started".to_string()),
        (Severity::Success, "Line 1 calibration completed".to_string()),
        (Severity::Info, "Material batch #4711 received".to_string()),
    ]
    .into_iter()
    .enumerate()
    .map(|(id, (severity, message))| Event {
        id: id as u64,
        at_ms: 0,
        severity,
        message,
    })
    .rev()
    .collect();
    events.truncate(config.max_events);

    Snapshot {
        sequence: 0,
        elapsed_ms: 0,
        lines,
        trend,
        daily,
        distribution,
        events,
    }
}

fn build_distribution(labels: &[String], weights: &[u32]) -> Vec<DistributionSlice> {
    labels
        .iter()
        .zip(apportion(weights))
        .map(|(label, share)| DistributionSlice {
            label: label.clone(),
            share,
        })
        .collect()
}

/// Split 100 percent across `weights` using the largest remainder method.
///
/// The result always sums to exactly 100 when `weights` is non-empty.
pub fn apportion(weights: &[u32]) -> Vec<u32> {
    if weights.is_empty() {
        return Vec::new();
    }

    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    if total == 0 {
        let mut shares = vec![100 / weights.len() as u32; weights.len()];
        let leftover = 100 - shares.iter().sum::<u32>();
        for share in shares.iter_mut().take(leftover as usize) {
            *share += 1;
        }
        return shares;
    }

    let mut shares: Vec<u32> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(weights.len());
    for (i, &w) in weights.iter().enumerate() {
        let quota = w as u64 * 100;
        shares.push((quota / total) as u32);
        remainders.push((i, quota % total));
    }

    let leftover = 100 - shares.iter().sum::<u32>();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for &(i, _) in remainders.iter().take(leftover as usize) {
        shares[i] += 1;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn assert_within_bounds(snapshot: &Snapshot, config: &SimulationConfig) {
        for line in &snapshot.lines {
            assert!(line.scrap <= config.scrap_ceiling, "scrap above ceiling");
            assert!(line.weekly_average >= 0.0);
            assert!(line.scrap_average >= 0.0);
            assert_eq!(
                line.status,
                LineStatus::from_scrap_rate(line.scrap_rate(), &config.thresholds)
            );
        }
        for point in &snapshot.trend {
            assert!(config.trend_band.contains(point.actual), "trend out of band");
        }
        for point in &snapshot.daily {
            assert!(config.daily_band.contains(point.output as f64), "daily out of band");
        }
        assert_eq!(snapshot.distribution_total(), 100);
        assert!(snapshot.events.len() <= config.max_events);
        assert!(
            snapshot.events.windows(2).all(|w| w[0].id > w[1].id),
            "events not most-recent-first"
        );
        assert!(snapshot.events.windows(2).all(|w| w[0].at_ms >= w[1].at_ms));
    }

    #[test]
    fn test_seed_snapshot_shape() {
        let config = seeded(1);
        let sim = Simulator::new(config.clone()).unwrap();
        let s = sim.snapshot();

        assert_eq!(s.sequence, 0);
        assert_eq!(s.lines.len(), 3);
        assert_eq!(
            s.lines.iter().map(|l| l.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(s.trend.len(), 12);
        assert_eq!(s.trend[0].label, "08:00");
        assert_eq!(s.daily.len(), 7);
        assert_eq!(s.distribution.len(), config.distribution_categories.len());
        assert!(!s.events.is_empty());
        assert_within_bounds(s, &config);
    }

    #[test]
    fn test_bounds_hold_over_many_ticks() {
        let config = SimulationConfig {
            seed: Some(99),
            scrap_max_delta: 15,
            scrap_ceiling: 40,
            trend_max_step: 25.0,
            daily_max_step: 400.0,
            distribution_max_step: 30,
            event_probability: 0.9,
            max_events: 4,
            ..Default::default()
        };
        let mut sim = Simulator::new(config.clone()).unwrap();

        for expected in 1..=500 {
            let snapshot = sim.tick().clone();
            assert_eq!(snapshot.sequence, expected);
            assert_within_bounds(&snapshot, &config);
        }
    }

    #[test]
    fn test_totals_never_decrease() {
        let mut sim = Simulator::new(seeded(3)).unwrap();
        let mut previous: Vec<u64> = sim.snapshot().lines.iter().map(|l| l.total).collect();

        for _ in 0..100 {
            let current: Vec<u64> = sim.tick().lines.iter().map(|l| l.total).collect();
            for (before, after) in previous.iter().zip(&current) {
                assert!(after >= before);
                assert!(after - before <= 25);
            }
            previous = current;
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Simulator::new(seeded(42)).unwrap();
        let mut b = Simulator::new(seeded(42)).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());

        for _ in 0..50 {
            assert_eq!(a.tick(), b.tick());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = Simulator::new(seeded(1)).unwrap();
        let b = Simulator::new(seeded(2)).unwrap();
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_one_tick_from_known_totals() {
        let config = seeded(5);
        let mut seed = Simulator::new(config.clone()).unwrap().snapshot().clone();
        for (line, total) in seed.lines.iter_mut().zip([100, 150, 200]) {
            line.total = total;
        }
        let events_before = seed.events.len();

        let mut sim = Simulator::with_snapshot(config.clone(), seed).unwrap();
        let next = sim.tick();

        for (line, prior) in next.lines.iter().zip([100u64, 150, 200]) {
            assert!(line.total >= prior);
            assert!(line.total <= prior + config.total_max_delta);
        }
        let events_after = next.events.len();
        assert!(events_after == events_before || events_after == events_before + 1);
    }

    #[test]
    fn test_largest_accepted_steps_tick_without_panicking() {
        use crate::config::{Band, MAX_MAGNITUDE, MAX_SCRAP_COUNT};

        let config = SimulationConfig {
            seed: Some(21),
            scrap_max_delta: MAX_SCRAP_COUNT,
            scrap_ceiling: MAX_SCRAP_COUNT,
            average_jitter: MAX_MAGNITUDE,
            scrap_average_jitter: MAX_MAGNITUDE,
            trend_band: Band::new(-MAX_MAGNITUDE, MAX_MAGNITUDE),
            trend_max_step: MAX_MAGNITUDE,
            daily_band: Band::new(0.0, MAX_MAGNITUDE),
            daily_max_step: MAX_MAGNITUDE,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let mut sim = Simulator::new(config.clone()).unwrap();
        for _ in 0..50 {
            let snapshot = sim.tick();
            assert_within_bounds(snapshot, &config);
        }
    }

    #[test]
    fn test_event_feed_is_capped() {
        let config = SimulationConfig {
            seed: Some(11),
            event_probability: 1.0,
            max_events: 5,
            ..Default::default()
        };
        let mut sim = Simulator::new(config).unwrap();

        for _ in 0..20 {
            sim.tick();
        }
        let events = &sim.snapshot().events;
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].at_ms, 20 * 2_000);
        assert!(events.windows(2).all(|w| w[0].id > w[1].id));
    }

    #[test]
    fn test_no_events_when_probability_zero_and_status_stable() {
        let config = SimulationConfig {
            seed: Some(8),
            event_probability: 0.0,
            scrap_max_delta: 0,
            average_jitter: 0.0,
            ..Default::default()
        };
        let mut sim = Simulator::new(config).unwrap();
        let before = sim.snapshot().events.clone();

        for _ in 0..10 {
            sim.tick();
        }
        assert_eq!(sim.snapshot().events, before);
    }

    #[test]
    fn test_status_change_emits_event() {
        let config = SimulationConfig {
            seed: Some(21),
            event_probability: 0.0,
            scrap_max_delta: 0,
            average_jitter: 0.0,
            ..Default::default()
        };
        let mut seed = Simulator::new(config.clone()).unwrap().snapshot().clone();
        // Line 1 sits at a critical scrap rate but is labelled as running.
        seed.lines[0].weekly_average = 1_000.0;
        seed.lines[0].scrap = 50;
        let mut sim = Simulator::with_snapshot(config, seed).unwrap();
        assert_eq!(sim.snapshot().lines[0].status, LineStatus::Critical);

        // Bring it back under the warning threshold.
        let mut recovered = sim.snapshot().clone();
        recovered.lines[0].scrap = 0;
        recovered.lines[0].status = LineStatus::Critical;
        sim.snapshot = recovered;
        let count_before = sim.snapshot().events.len();

        let next = sim.tick();
        assert_eq!(next.lines[0].status, LineStatus::Running);
        assert_eq!(next.events.len(), (count_before + 1).min(8));
        assert_eq!(next.events[0].severity, Severity::Success);
        assert!(next.events[0].message.contains("Line 1"));
    }

    #[test]
    fn test_with_snapshot_fills_empty_distribution() {
        let config = seeded(4);
        let mut seed = Simulator::new(config.clone()).unwrap().snapshot().clone();
        seed.distribution.clear();

        let sim = Simulator::with_snapshot(config, seed).unwrap();
        let dist = &sim.snapshot().distribution;
        assert_eq!(dist.len(), 4);
        assert_eq!(sim.snapshot().distribution_total(), 100);
        assert_eq!(
            dist.iter().map(|s| s.share).collect::<Vec<_>>(),
            vec![25, 25, 25, 25]
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SimulationConfig {
            tick_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(ConfigError::NonPositiveInterval(_))
        ));
    }

    #[test]
    fn test_apportion_sums_to_hundred() {
        assert_eq!(apportion(&[1, 1, 1]), vec![34, 33, 33]);
        assert_eq!(apportion(&[50, 25, 25]), vec![50, 25, 25]);
        assert_eq!(apportion(&[7]), vec![100]);
        assert_eq!(apportion(&[0, 0]), vec![50, 50]);
        assert!(apportion(&[]).is_empty());

        for weights in [[3u32, 7, 11, 13], [1, 100, 1, 1], [33, 33, 33, 1]] {
            assert_eq!(apportion(&weights).iter().sum::<u32>(), 100);
        }
    }
}
