//! Nomflix - terminal movie & TV browser
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! nomflix
//! nomflix --route /tv
//!
//! # CLI mode (for automation)
//! nomflix search "blade runner"
//! nomflix home --json
//! ```

use std::fs::File;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, WriteLogger};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use nomflix::app::{App, FetchRequest, FetchResult};
use nomflix::cli::{self, Cli, Command, ExitCode, Output};
use nomflix::commands;
use nomflix::config::Config;
use nomflix::ui::pages::PageRequest;
use nomflix::TmdbClient;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

/// ~60 fps, enough for the header tweens
const FRAME: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&cli, &config);
    if let Some(e) = config_error {
        warn!("Ignoring config, using defaults: {:#}", e);
    }

    if cli.is_cli_mode() {
        run_cli(cli, &config).await.into()
    } else {
        let output = Output::new(&cli);
        let route = match cli::validate_route(&cli.route) {
            Ok(r) => r.to_string(),
            Err(e) => return output.error(e, ExitCode::InvalidArgs).into(),
        };
        match run_tui(&route, &config).await {
            Ok(()) => ExitCode::Success.into(),
            Err(e) => {
                error!("TUI exited with error: {:#}", e);
                output.error(format!("{:#}", e), ExitCode::Error).into()
            }
        }
    }
}

/// File logger; the terminal belongs to the TUI
fn init_logging(cli: &Cli, config: &Config) {
    let level = cli.log_level.map(LevelFilter::from).unwrap_or_else(|| config.log_level());
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = cli.log_file.clone().or_else(|| config.log_file()) else {
        return;
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let _ = std::fs::create_dir_all(parent);
    }
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, file);
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);
    match cli.command {
        Some(Command::Home(cmd)) => commands::home_cmd(cmd, config, &output).await,
        Some(Command::Tv(cmd)) => commands::tv_cmd(cmd, config, &output).await,
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, config, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(route: &str, config: &Config) -> Result<()> {
    info!("Starting TUI at {}", route);
    let client = config
        .tmdb_api_key()
        .map(|key| TmdbClient::new(key).with_language(config.language()));

    let mut app = App::new(route, config.header.header_config(), config.header.scroll_step);
    if client.is_none() {
        error!("No TMDB API key; listings will fail");
    }

    let mut terminal = init_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, client).await;

    if app.running {
        app.quit();
    }
    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    info!("TUI stopped");
    result
}

/// Main event loop - input, fetch results, animation, render
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Option<TmdbClient>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut last_frame = Instant::now();

    while app.running {
        spawn_fetches(app.take_requests(), client.as_ref(), &tx);
        drain_results(&mut rx, app);

        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|frame| app.render(frame))?;

        if event::poll(FRAME)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// One task per listing; results come back over the channel
fn spawn_fetches(requests: Vec<FetchRequest>, client: Option<&TmdbClient>, tx: &UnboundedSender<FetchResult>) {
    for req in requests {
        let Some(client) = client else {
            let _ = tx.send(FetchResult {
                url: req.url,
                route: req.route,
                outcome: Err("No TMDB API key configured".to_string()),
            });
            continue;
        };
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = match &req.request {
                PageRequest::NowPlaying => client.now_playing().await,
                PageRequest::PopularTv => client.popular_tv().await,
                PageRequest::Search(query) => client.search(query).await,
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(FetchResult {
                url: req.url,
                route: req.route,
                outcome,
            });
        });
    }
}

fn drain_results(rx: &mut UnboundedReceiver<FetchResult>, app: &mut App) {
    while let Ok(result) = rx.try_recv() {
        app.apply_fetch(result);
    }
}
