//! Application state and interaction logic.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use crate::data::{ProductionLine, Snapshot};
use crate::source::DataSource;
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<Snapshot>,
    pub load_error: Option<String>,
    pub last_update: Option<Instant>,

    // Theme
    pub dark_mode: bool,
    pub theme: Theme,

    // Navigation state
    pub selected_line: usize,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given source with an initial theme.
    pub fn new(source: Box<dyn DataSource>, theme: Theme) -> Self {
        Self {
            running: true,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            load_error: None,
            last_update: None,
            dark_mode: theme.dark,
            theme,
            selected_line: 0,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new snapshot.
    ///
    /// Returns true if a new snapshot replaced the current one.
    pub fn reload_data(&mut self) -> bool {
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return false;
        }

        let Some(snapshot) = self.source.poll() else {
            return false;
        };
        debug!(sequence = snapshot.sequence, "snapshot received");

        // Clamp selection index
        if self.selected_line >= snapshot.lines.len() {
            self.selected_line = snapshot.lines.len().saturating_sub(1);
        }
        self.data = Some(snapshot);
        self.load_error = None;
        self.last_update = Some(Instant::now());
        true
    }

    /// Flip between dark and light palettes. Metric data is untouched.
    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = Theme::for_dark_mode(self.dark_mode);
        debug!(dark_mode = self.dark_mode, "theme toggled");
    }

    fn line_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.lines.len())
    }

    /// Select the next line card (wraps around).
    pub fn select_next(&mut self) {
        let count = self.line_count();
        if count > 0 {
            self.selected_line = (self.selected_line + 1) % count;
        }
    }

    /// Select the previous line card (wraps around).
    pub fn select_prev(&mut self) {
        let count = self.line_count();
        if count > 0 {
            self.selected_line = (self.selected_line + count - 1) % count;
        }
    }

    /// Select a line by its zero-based position; ignored when out of range.
    pub fn select_line(&mut self, index: usize) {
        if index < self.line_count() {
            self.selected_line = index;
        }
    }

    /// The currently selected production line.
    pub fn selected(&self) -> Option<&ProductionLine> {
        self.data.as_ref()?.lines.get(self.selected_line)
    }

    /// Open the detail overlay for the selected line.
    pub fn enter_detail(&mut self) {
        if self.selected().is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Close overlays, innermost first.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.show_detail_overlay = false;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Stop the data source and signal the main loop to exit.
    pub fn quit(&mut self) {
        self.source.shutdown();
        self.running = false;
        info!("quitting");
    }

    /// Export the current snapshot to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        write_export(data, path)
    }
}

/// Build the export document: the snapshot plus a computed summary.
pub fn export_value(snapshot: &Snapshot) -> serde_json::Value {
    serde_json::json!({
        "summary": snapshot.summary(),
        "snapshot": snapshot,
    })
}

/// Write the export document for `snapshot` to `path` as pretty JSON.
pub fn write_export(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_value(snapshot))?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), sequence = snapshot.sequence, "snapshot exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::data::Snapshot;
    use crate::source::{ChannelSource, Simulator};
    use tokio::sync::watch;

    fn seeded() -> Simulator {
        Simulator::new(SimulationConfig {
            seed: Some(3),
            ..Default::default()
        })
        .unwrap()
    }

    fn app_with_data() -> (watch::Sender<Option<Snapshot>>, Simulator, App) {
        let (tx, source) = ChannelSource::create("test");
        let sim = seeded();
        tx.send(Some(sim.snapshot().clone())).unwrap();
        let mut app = App::new(Box::new(source), Theme::dark());
        assert!(app.reload_data());
        (tx, sim, app)
    }

    #[test]
    fn test_reload_replaces_snapshot_whole() {
        let (tx, mut sim, mut app) = app_with_data();
        assert_eq!(app.data.as_ref().map(|d| d.sequence), Some(0));
        assert!(!app.reload_data());

        let next = sim.tick().clone();
        tx.send(Some(next.clone())).unwrap();
        assert!(app.reload_data());
        assert_eq!(app.data.as_ref(), Some(&next));
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_toggle_theme_twice_restores_view_and_keeps_data() {
        let (_tx, _sim, mut app) = app_with_data();
        let original_theme = app.theme.clone();
        let original_data = app.data.clone();

        app.toggle_theme();
        assert!(!app.dark_mode);
        assert_eq!(app.theme, Theme::light());
        assert_eq!(app.data, original_data);

        app.toggle_theme();
        assert!(app.dark_mode);
        assert_eq!(app.theme, original_theme);
        assert_eq!(app.data, original_data);
    }

    #[test]
    fn test_line_selection_wraps() {
        let (_tx, _sim, mut app) = app_with_data();
        assert_eq!(app.selected_line, 0);

        app.select_prev();
        assert_eq!(app.selected_line, 2);
        app.select_next();
        assert_eq!(app.selected_line, 0);

        app.select_line(1);
        assert_eq!(app.selected().map(|l| l.number), Some(2));
        app.select_line(7);
        assert_eq!(app.selected_line, 1);
    }

    #[test]
    fn test_selection_without_data_is_noop() {
        let (_tx, source) = ChannelSource::create("empty");
        let mut app = App::new(Box::new(source), Theme::dark());
        app.select_next();
        app.enter_detail();
        assert_eq!(app.selected_line, 0);
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_overlays_close_innermost_first() {
        let (_tx, _sim, mut app) = app_with_data();
        app.enter_detail();
        app.toggle_help();
        assert!(app.show_detail_overlay && app.show_help);

        app.go_back();
        assert!(!app.show_help);
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_export_state_writes_snapshot_and_summary() {
        let (_tx, _sim, app) = app_with_data();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        app.export_state(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let data = app.data.as_ref().unwrap();
        assert_eq!(written["snapshot"]["sequence"], 0);
        assert_eq!(written["summary"]["total"], data.summary().total);
        assert_eq!(
            written["snapshot"]["lines"].as_array().map(|l| l.len()),
            Some(3)
        );
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, source) = ChannelSource::create("empty");
        let app = App::new(Box::new(source), Theme::dark());
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("x.json")).is_err());
    }

    #[test]
    fn test_quit_stops_running() {
        let (_tx, _sim, mut app) = app_with_data();
        app.quit();
        assert!(!app.running);
    }
}
