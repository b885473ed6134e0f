// ABOUTME: Main entry point for bizauth with TUI and CLI support
//
// Binary: bizauth
// Usage: bizauth [COMMAND]
// - No command: launches TUI at the carousel
// - tui: launch TUI, optionally at another route (--start, --token, --email, --instant)
// - locations: list location reference data
// - config: print the effective configuration

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use bizauth::app::{App, EventHandler};
use bizauth::cli::{self, Commands, TuiArgs};
use bizauth::components::LayoutComponent;
use bizauth::config::{AppConfig, SimulationConfig};

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(Commands::Locations(locations_args)) => {
            cli::locations::execute(&locations_args, args.format)
        }
        Some(Commands::Config) => cli::config::execute(args.format),

        // TUI mode (explicit or default)
        Some(Commands::Tui(tui_args)) => launch_tui(tui_args).await,
        None => launch_tui(TuiArgs::default()).await,
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn launch_tui(tui_args: TuiArgs) -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let mut config = AppConfig::load()?;
    if tui_args.instant {
        config.simulation = SimulationConfig::instant();
    }
    tracing::info!("Starting bizauth at {}", tui_args.start);
    let mut app = App::from_config(config, tui_args.start, tui_args.route_params())?;
    let mut layout = LayoutComponent::new();

    // Flush any pending terminal events so stray keypresses don't reach the first screen
    while event::poll(Duration::from_millis(10)).unwrap_or(false) {
        let _ = event::read();
    }

    run_tui(&mut app, &mut layout).await
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, layout, &mut terminal).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = app.state.app_config.ui.tick_rate();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let app_event = match event::read()? {
                // Windows reports releases too; only presses drive the UI
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    EventHandler::handle_key_event(key_event, &mut app.state)
                }
                Event::Paste(text) => EventHandler::handle_paste(text, &app.state),
                _ => None,
            };
            if let Some(app_event) = app_event {
                tracing::debug!("Processing {:?}", app_event);
                EventHandler::process_event(app_event, &mut app.state);
            }
        }

        if app.state.should_quit {
            tracing::info!("Quitting from {}", app.state.current_route());
            break;
        }

        // Background messages land between draws
        app.tick().await?;

        // Redraw right away after a message instead of waiting out the tick
        if app.needs_ui_refresh() || last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Create log directory if it doesn't exist
    let log_dir = dirs::home_dir()
        .map(|home| home.join(".bizauth").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".bizauth/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "bizauth-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot open {}: {}", log_file.display(), e);
            return;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bizauth=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
