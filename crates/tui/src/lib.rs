//! sales-tui - terminal dashboard for the sales forecasting service.
//!
//! The dashboard renders from an already-loaded [`SalesService`] handle and
//! never builds features itself.

pub mod app;
pub mod event;
pub mod ui;
pub mod widgets;

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use sales_api::{SalesService, DEFAULT_LOG_FILTER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use event::{handle_key_event, poll_event};
use ui::draw_ui;

/// Log file used while the terminal is owned by the dashboard
pub const LOG_FILE: &str = "sales-dashboard.log";

/// Subscriber writing plain-text events to `file`.
pub fn file_subscriber(
    file: File,
    filter: EnvFilter,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
}

/// Install a subscriber that appends to `path` instead of the terminal.
pub fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    file_subscriber(file, filter).try_init()?;
    Ok(())
}

/// Take over the terminal and run the dashboard until the user quits.
pub fn run_dashboard(service: Arc<SalesService>) -> anyhow::Result<()> {
    run_with_app(App::new(service))
}

/// Run the dashboard and surface messages from `notices` in the status line.
pub fn run_dashboard_with_notices(
    service: Arc<SalesService>,
    notices: Receiver<String>,
) -> anyhow::Result<()> {
    run_with_app(App::new(service).with_notices(notices))
}

fn run_with_app(mut app: App) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Draw UI
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Clear expired status messages
        app.clear_expired_status();
        app.poll_notices();

        // Handle events
        if let Some(Event::Key(key)) = poll_event(tick_rate)? {
            handle_key_event(app, key);
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
