//! Folio - a terminal viewer for a personal portfolio.
//!
//! The portfolio is fetched once, cached for the configured lifetime, and
//! revalidated whenever a tab is shown. Images referenced by the portfolio
//! are preloaded in the background.

mod app;
mod ui;
mod utils;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_core::preload::{HttpImagePreloader, ImagePreloader};
use folio_core::service::{FilePortfolioService, HttpPortfolioService, PortfolioService};
use folio_core::telemetry::TracingTracker;
use folio_core::{Config, DataContext, PortfolioCache};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE: &str = "folio.log";

const USAGE: &str = "\
Usage: folio [OPTIONS]

Options:
  --data <PATH>     Read the portfolio from a local JSON file
  --locale <CODE>   Portfolio locale (default: en)
  --no-preload      Do not preload images
  -h, --help        Print this help

Environment:
  FOLIO_API_URL     Base URL of the portfolio backend
  FOLIO_DATA_FILE   Local JSON file, same as --data
  RUST_LOG          Log filter (logs go to the cache directory)";

/// Command line options layered over the config file
#[derive(Debug, Default, PartialEq)]
struct Args {
    data_file: Option<PathBuf>,
    locale: Option<String>,
    no_preload: bool,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let path = args.next().context("--data requires a path")?;
                parsed.data_file = Some(PathBuf::from(path));
            }
            "--locale" => {
                parsed.locale = Some(args.next().context("--locale requires a value")?);
            }
            "--no-preload" => parsed.no_preload = true,
            "-h" | "--help" => parsed.help = true,
            other => bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }
    Ok(parsed)
}

/// Initialize the tracing subscriber. Logs go to a file so they do not
/// draw over the terminal UI.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::cache_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        log_dir, LOG_FILE,
    ));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

fn build_service(config: &Config) -> Result<Arc<dyn PortfolioService>> {
    if let Some(ref path) = config.data_file {
        info!(path = %path.display(), "Using local portfolio file");
        return Ok(Arc::new(FilePortfolioService::new(path.clone())));
    }
    if let Some(ref url) = config.api_base_url {
        info!(url = %url, "Using portfolio backend");
        return Ok(Arc::new(HttpPortfolioService::new(url)?));
    }
    bail!(
        "No portfolio source configured. Set FOLIO_API_URL, FOLIO_DATA_FILE, or pass --data.\n\n{}",
        USAGE
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let _log_guard = init_tracing();
    info!("Folio starting");

    let mut config = Config::load()?;
    if let Some(path) = args.data_file {
        config.data_file = Some(path);
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }

    let service = build_service(&config)?;
    let tracker = Arc::new(TracingTracker::new());
    let preloader = if args.no_preload {
        None
    } else {
        match HttpImagePreloader::new(config.critical_images.clone(), config.max_concurrent_preloads) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(error = %e, "Image preloading disabled");
                None
            }
        }
    };

    let mut builder = PortfolioCache::builder(service)
        .tracker(tracker.clone())
        .cache_duration(config.cache_duration())
        .locale(config.locale.clone());
    if let Some(ref p) = preloader {
        builder = builder.preloader(Arc::new(p.clone()) as Arc<dyn ImagePreloader>);
    }
    let context = DataContext::with_provider(builder.build());

    let mut app = App::new(context, preloader, tracker)?;
    app.mount()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Folio shutting down");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Pick up finished fetches before drawing
        app.tick();

        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
