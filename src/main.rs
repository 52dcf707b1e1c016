use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;

use oceanwatch::app::{App, View};
use oceanwatch::data::{mock, FleetData, SignalPolicy};
use oceanwatch::source::{DataSource, FileSource, StaticSource};
use oceanwatch::settings::Overrides;
use oceanwatch::{events, export, ui, Settings};

const DEFAULT_LOG_FILTER: &str = "oceanwatch=info";

/// Minimum terminal size for usable display
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 12;

#[derive(Parser, Debug)]
#[command(name = "oceanwatch")]
#[command(about = "Terminal dashboard for monitoring marine sensor buoys")]
struct Args {
    /// Fleet snapshot JSON file to watch (defaults to the built-in mock fleet)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Signal strength cut-offs
    #[arg(long, value_enum)]
    signal_policy: Option<SignalPolicy>,

    /// Battery percentage above which a buoy is green
    #[arg(long)]
    battery_high: Option<f64>,

    /// Battery percentage above which a buoy is yellow
    #[arg(long)]
    battery_low: Option<f64>,

    /// Export the derived fleet state to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file while the dashboard runs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            fleet_file: self.file.clone(),
            refresh_secs: self.refresh,
            signal_policy: self.signal_policy,
            battery_high: self.battery_high,
            battery_low: self.battery_low,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_overrides(&args.overrides())?;

    let exporting = args.export.is_some();
    init_tracing(settings.log_file.as_deref(), exporting)?;
    tracing::debug!(?settings, "settings resolved");

    if let Some(ref export_path) = args.export {
        return export_to_file(&settings, export_path);
    }

    run_tui(build_source(&settings), &settings)
}

/// Install the global subscriber.
///
/// The dashboard owns the terminal, so interactive runs only log when a log
/// file is configured. Export runs log to stderr.
fn init_tracing(log_file: Option<&Path>, exporting: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if exporting => builder.with_writer(io::stderr).init(),
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn build_source(settings: &Settings) -> Box<dyn DataSource> {
    match settings.fleet_file {
        Some(ref path) => Box::new(FileSource::new(path)),
        None => Box::new(StaticSource::mock()),
    }
}

/// Export the derived fleet state to a JSON file
fn export_to_file(settings: &Settings, export_path: &Path) -> Result<()> {
    let thresholds = settings.thresholds();
    let data = match settings.fleet_file {
        Some(ref path) => FleetData::load(path, &thresholds)
            .with_context(|| format!("failed to load fleet file {}", path.display()))?,
        None => FleetData::from_snapshot(mock::fleet_snapshot(), &thresholds),
    };

    export::write_export(&data, None, export_path)?;

    println!("Exported fleet state to: {}", export_path.display());
    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings.thresholds());
    if let Err(e) = app.reload_data() {
        tracing::warn!(error = %e, "initial load failed");
    }
    tracing::info!(source = app.source_description(), "dashboard started");

    let result = run_app(&mut terminal, &mut app, settings.refresh_interval());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // Content starts after header (1) + tabs (1)
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 2),
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            if let Err(e) = app.reload_data() {
                tracing::warn!(error = %e, "refresh failed");
            }
            last_refresh = Instant::now();
        }
    }

    tracing::info!("dashboard stopped");
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5u16.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    ui::common::render_header(frame, app, chunks[0]);
    ui::common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Overview => ui::overview::render(frame, app, chunks[2]),
        View::Fleet => ui::fleet::render(frame, app, chunks[2]),
        View::Map => ui::map::render(frame, app, chunks[2]),
    }

    ui::common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        ui::detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        ui::common::render_help(frame, app, area);
    }
}
