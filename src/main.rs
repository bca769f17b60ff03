//! The ocean-floor mapping page, in a terminal.
//!
//! Scroll down and each section reveals itself the way the page does in a
//! browser: the mapping steps light up one by one, the organisation cards
//! fade in with a stagger.  Run with `--print-config` to see every tunable.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::nav::SectionId;
use crate::ui::page_view;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Ocean-floor mapping explainer for the terminal")]
struct Cli {
    /// Section to open at, by anchor (`#tecnologia` or `tecnologia`).
    #[arg(long, value_parser = parse_section)]
    section: Option<SectionId>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/deep-chart/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Save the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,

    /// Animation frame interval in milliseconds.
    #[arg(long, default_value_t = 33, value_parser = clap::value_parser!(u64).range(5..=1000))]
    tick_ms: u64,
}

fn parse_section(s: &str) -> Result<SectionId, String> {
    SectionId::from_anchor(s).ok_or_else(|| {
        let known: Vec<&str> = SectionId::ALL.iter().map(|s| s.anchor()).collect();
        format!("unknown section `{s}`; expected one of {}", known.join(", "))
    })
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config_file = cli.config.clone().unwrap_or_else(config::config_path);
    let user_config = AppConfig::load_from(&config_file);

    if cli.print_config {
        print!("{}", user_config.serialise());
        return Ok(());
    }
    if cli.write_config {
        user_config
            .save_to(&config_file)
            .with_context(|| format!("writing {}", config_file.display()))?;
        println!("{}", config_file.display());
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(size.width, size.height, user_config);
    if let Some(section) = cli.section {
        state.page.jump_to_section(section);
    }
    tracing::info!(cols = size.width, rows = size.height, "page mounted");

    let events = spawn_event_reader(Duration::from_millis(cli.tick_ms));
    let result = run(&mut terminal, &mut state, events).await;

    // ── teardown ──────────────────────────────────────────────
    state.page.dispose();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    mut events: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        // ── draw first ─────────────────────────────────────────
        terminal.draw(|frame| page_view::draw(frame, state))?;

        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    tracing::warn!("event reader stopped");
                    break;
                };
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => state.on_resize(w, h),
                    AppEvent::Tick => state.on_tick(),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                state.should_quit = true;
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
