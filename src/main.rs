mod app;
mod config;
mod stats;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use stats::snapshot::Snapshot;
use stats::{Digit, Distribution};
use theme::ThemeMode;

#[derive(Parser, Debug)]
#[command(name = "digitdist")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "A terminal viewer for digit frequency distributions")]
struct Args {
    /// Snapshot JSON to display (re-read when it changes)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Color theme (overrides config)
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,

    /// Treat this digit as live instead of the snapshot's
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=9))]
    digit: Option<u8>,

    /// Print the classified distribution as JSON and exit
    #[arg(long)]
    json: bool,

    /// Snapshot poll interval in milliseconds (overrides config)
    #[arg(long)]
    refresh_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging. The TUI owns the terminal, so it logs to a file.
    let tui = !args.json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer(tui))
                .with_ansi(!tui),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(refresh_ms) = args.refresh_ms {
        config = config.with_refresh_ms(refresh_ms);
    }

    let input = args.input.clone().or_else(|| config.default_input.clone());
    let theme = args.theme.unwrap_or(config.theme);
    let pinned = args.digit.and_then(Digit::new);

    if args.json {
        return print_json(input, theme, pinned).await;
    }

    run_tui(&config, input, theme, pinned).await
}

/// stderr for one-shot output; `<cache dir>/digitdist/digitdist.log` for the TUI
fn log_writer(tui: bool) -> BoxMakeWriter {
    if !tui {
        return BoxMakeWriter::new(io::stderr);
    }

    match dirs::cache_dir().and_then(|dir| open_log_file(&dir)) {
        Some(file) => BoxMakeWriter::new(std::sync::Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

fn open_log_file(cache_dir: &Path) -> Option<std::fs::File> {
    let dir = cache_dir.join("digitdist");
    std::fs::create_dir_all(&dir).ok()?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("digitdist.log"))
        .ok()
}

async fn print_json(input: Option<PathBuf>, theme: ThemeMode, pinned: Option<Digit>) -> Result<()> {
    let path = input.context("--json needs a snapshot (--input or default_input in config)")?;
    let snapshot = Snapshot::load(&path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    if snapshot.frequencies.is_empty() {
        tracing::warn!("Snapshot {} has no frequencies", path.display());
    }

    let output = json_report(&snapshot, pinned, theme);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Classified distribution as printed by `--json`
fn json_report(snapshot: &Snapshot, pinned: Option<Digit>, theme: ThemeMode) -> serde_json::Value {
    let active = pinned.or(snapshot.current_digit);
    let distribution = Distribution::compute(&snapshot.frequencies, active);

    serde_json::json!({
        "theme": theme,
        "active_digit": active,
        "digits": distribution.digits,
    })
}

async fn run_tui(
    config: &AppConfig,
    input: Option<PathBuf>,
    theme: ThemeMode,
    pinned: Option<Digit>,
) -> Result<()> {
    // Build state before touching the terminal so startup errors print normally
    let mut app = App::new(config, input, theme, pinned).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key).await {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh
        if let Err(e) = app.tick().await {
            tracing::warn!("Tick failed: {}", e);
        }
    }
}
