// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod data;
mod error;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View, LOAD_ERROR_MESSAGE};
use data::{DashboardData, DisplayOptions};
use settings::Settings;
use source::{FileSource, HttpSource, RefreshOutcome, StatusSource};

#[derive(Parser, Debug)]
#[command(name = "statusboard")]
#[command(about = "Terminal status dashboard for Upptime-monitored services")]
struct Args {
    /// Settings file (default: statusboard.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repository owner hosting the Upptime data
    #[arg(long)]
    owner: Option<String>,

    /// Repository name hosting the Upptime data
    #[arg(long)]
    repo: Option<String>,

    /// Explicit service summary URL
    #[arg(long, conflicts_with = "summary_file")]
    summary_url: Option<String>,

    /// Explicit incident list URL
    #[arg(long, conflicts_with = "summary_file")]
    incidents_url: Option<String>,

    /// Read the service summary from a local file instead of HTTP
    #[arg(long)]
    summary_file: Option<PathBuf>,

    /// Read incidents from a local file (used with --summary-file)
    #[arg(long, requires = "summary_file")]
    incidents_file: Option<PathBuf>,

    /// Refresh interval (e.g., "5m", "30s")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Days shown in each uptime strip
    #[arg(long)]
    days: Option<usize>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run one refresh cycle, export the dashboard to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file.as_deref(), args.export.is_some())?;

    let settings = load_settings(&args)?;
    let options = settings.display_options();

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(&args, &settings, &options, export_path);
    }

    // Handle local file mode
    if let Some(ref summary_path) = args.summary_file {
        return run_tui(Box::new(file_source(summary_path, args.incidents_file.as_deref())), options);
    }

    // Default: periodic HTTP refresh
    run_with_http(&settings, options)
}

/// Install a tracing subscriber.
///
/// Logs go to `log_file` if given, else to stderr in export mode. The TUI
/// without a log file discards them.
fn init_tracing(log_file: Option<&Path>, export: bool) -> Result<()> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "statusboard=info".into())
    };

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if export {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    Ok(())
}

/// Settings from file and environment, with command-line overrides on top.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(ref owner) = args.owner {
        settings.owner = owner.clone();
    }
    if let Some(ref repo) = args.repo {
        settings.repo = repo.clone();
    }
    if let Some(ref url) = args.summary_url {
        settings.summary_url = Some(url.clone());
    }
    if let Some(ref url) = args.incidents_url {
        settings.incidents_url = Some(url.clone());
    }
    if let Some(ref refresh) = args.refresh {
        settings.refresh_interval = refresh.clone();
    }
    if let Some(days) = args.days {
        settings.window_days = days;
    }

    settings.validate()?;
    Ok(settings)
}

fn file_source(summary_path: &Path, incidents_path: Option<&Path>) -> FileSource {
    let source = FileSource::new(summary_path);
    match incidents_path {
        Some(path) => source.with_incidents(path),
        None => source,
    }
}

/// Run with the periodic HTTP source
fn run_with_http(settings: &Settings, options: DisplayOptions) -> Result<()> {
    // The refresh task runs on this runtime while the TUI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;

    let client = settings.client()?;
    let interval = settings.refresh_interval()?;
    info!(
        summary = %client.summary_url(),
        incidents = %client.incidents_url(),
        interval = ?interval,
        "starting periodic refresh"
    );

    let source = {
        let _guard = rt.enter();
        HttpSource::spawn(client, interval)
    };

    // Dropping the app drops the source, which cancels the refresh task
    run_tui(Box::new(source), options)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn StatusSource>, options: DisplayOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, options);
    app.reload_data();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        // Apply any settled refresh cycles before drawing
        app.reload_data();

        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ui::common::centered_band(area, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Length(3), // Status banner
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::common::render_banner(frame, app, chunks[2]);

            match app.current_view {
                View::Services => ui::services::render(frame, app, chunks[3]),
                View::Incidents => ui::incidents::render(frame, app, chunks[3]),
            }

            ui::common::render_status_bar(frame, app, chunks[4]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Rows: header (1) + tabs (1) + banner (3) + table border (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 6);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Run a single refresh cycle and export the derived dashboard as JSON
fn export_to_file(
    args: &Args,
    settings: &Settings,
    options: &DisplayOptions,
    export_path: &Path,
) -> Result<()> {
    let outcome = match args.summary_file {
        Some(ref summary_path) => {
            let mut source = file_source(summary_path, args.incidents_file.as_deref());
            source
                .poll()
                .context("File source produced no outcome")?
        }
        None => {
            let rt = tokio::runtime::Runtime::new()?;
            let client = settings.client()?;
            rt.block_on(client.refresh())
        }
    };

    let snapshot = match outcome {
        RefreshOutcome::Ready(snapshot) => snapshot,
        RefreshOutcome::Failed(e) => bail!("{} ({})", LOAD_ERROR_MESSAGE, e),
    };

    let data = DashboardData::from_snapshot(snapshot, options, Local::now().date_naive());
    let json = serde_json::to_string_pretty(&data.export_json(Utc::now()))?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    println!("Exported status to: {}", export_path.display());
    Ok(())
}
