use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use linewatch::data::duration::parse_duration;
use linewatch::{
    app, events, ui, App, DashboardConfig, DataSource, Simulator, Theme, ThemeMode, TickerSource,
};

#[derive(Parser, Debug)]
#[command(name = "linewatch")]
#[command(about = "Terminal operations dashboard for production-line metrics")]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick interval (e.g., "2s", "500ms")
    #[arg(short, long)]
    interval: Option<String>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of events kept in the feed
    #[arg(long)]
    max_events: Option<usize>,

    /// Initial colour scheme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Write logs to this file (the terminal is owned by the dashboard)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Simulate without a terminal, export the final snapshot to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Number of ticks to simulate before exporting (used with --export)
    #[arg(long, default_value = "0", requires = "export")]
    ticks: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(args.log_file.as_deref())?;

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(ref interval) = args.interval {
        config.simulation.tick_interval = parse_duration(interval)?;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(max_events) = args.max_events {
        config.simulation.max_events = max_events;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(config, args.ticks, export_path);
    }

    run_with_ticker(config)
}

/// Install a file logger when a path is given. The guard must outlive the app.
fn init_logging(path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "linewatch starting");
    Ok(Some(guard))
}

/// Run the dashboard against a simulator driven by a background ticker.
fn run_with_ticker(config: DashboardConfig) -> Result<()> {
    // Build a tokio runtime for the ticker task
    let rt = tokio::runtime::Runtime::new()?;
    let _enter = rt.enter();

    let mut source = TickerSource::new(config.simulation)?;
    source.start()?;

    let theme = Theme::from_mode(config.theme);
    run_tui(Box::new(source), theme)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, theme: Theme) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, theme);
    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::dashboard::render(frame, app))?;

        // Poll for events with a short timeout
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }

        // The ticker publishes on its own schedule; pick up whatever is newest
        app.reload_data();
    }

    Ok(())
}

/// Advance a simulator `ticks` times and export the final snapshot
fn export_to_file(config: DashboardConfig, ticks: u64, export_path: &Path) -> Result<()> {
    let mut simulator = Simulator::new(config.simulation)?;
    for _ in 0..ticks {
        simulator.tick();
    }

    app::write_export(simulator.snapshot(), export_path)?;
    println!("Exported dashboard state to: {}", export_path.display());
    Ok(())
}
