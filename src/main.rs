//! helmwatch: terminal dashboard for the helmet-detection access system.
//!
//! Polls the status/log service and Open-Meteo and renders a status header,
//! clock/weather panel, and paginated log table in an alternate screen.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use helmwatch::app::App;
use helmwatch::config::HelmwatchConfig;
use helmwatch::error::HelmwatchError;
use helmwatch::poller::{DashboardSource, DemoSource, LiveSource};
use helmwatch::{cache, http, ui};

/// Terminal dashboard for the helmet-detection door access system
#[derive(Parser, Debug)]
#[command(name = "helmwatch", version)]
#[command(about = "Terminal monitoring dashboard for a helmet-detection door access system")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the status/log service (overrides configuration)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Run with fabricated data (no backend or network required)
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = HelmwatchConfig::load_from_path(args.config.clone())?;
    if let Some(endpoint) = args.endpoint {
        config.api.base_url = endpoint;
        config.validate()?;
    }

    init_logging(&config)?;
    tracing::info!("helmwatch {} starting", helmwatch::VERSION);

    // The weather client falls back to direct fetches when the cache is
    // unavailable, so a failure here only loses caching.
    if let Err(e) = cache::init(config.cache_dir()) {
        tracing::warn!("Failed to open cache database: {e:#}");
    }

    let source: Arc<dyn DashboardSource> = if args.demo {
        Arc::new(DemoSource::new())
    } else {
        let client = http::build_client(&config.api)?;
        Arc::new(LiveSource::new(client, &config))
    };

    let app = Arc::new(Mutex::new(App::new(Duration::from_secs(
        config.poll.logs_seconds,
    ))));

    let handles = helmwatch::poller::spawn(source, app.clone(), &config);

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app).await;

    restore_terminal(&mut terminal)?;

    for handle in handles {
        handle.abort();
    }

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, HelmwatchError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), HelmwatchError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    loop {
        // Draw UI
        {
            let app_guard = app.lock().await;
            terminal.draw(|frame| {
                ui::render(frame, &app_guard);
            })?;
        }

        // Handle input with a timeout so the clock keeps ticking
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    let mut app_guard = app.lock().await;
                    match key.code {
                        KeyCode::Char(c) => app_guard.handle_key(c),
                        KeyCode::Left => app_guard.prev_page(),
                        KeyCode::Right => app_guard.next_page(),
                        KeyCode::Esc => app_guard.handle_key('q'),
                        _ => {}
                    }
                }
            }
        }

        if app.lock().await.should_quit() {
            return Ok(());
        }
    }
}

fn init_logging(config: &HelmwatchConfig) -> Result<()> {
    let log_path = config.log_file();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::File::create(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    // Stdout belongs to the alternate screen, so logs go to a file.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(())
}
