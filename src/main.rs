use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::Duration;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use rollcall::app::App;
use rollcall::cli::CliArgs;
use rollcall::config::{self, Config};

fn run<B: Backend>(app: &mut App, terminal: &mut Terminal<B>, tick_rate: Duration) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

/// Logs go to a file; the terminal is owned by the alternate screen.
/// The returned guard flushes pending lines when dropped.
fn init_logging(cli_args: &CliArgs) -> Result<WorkerGuard> {
    let path = match &cli_args.log_file {
        Some(p) => p.clone(),
        None => config::get_default_log_path()?,
    };
    let (writer, guard) = tracing_appender::non_blocking(config::log_appender(&path)?);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let _log_guard = init_logging(&cli_args)?;

    info!("Starting Rollcall");

    let config = Config::from_cli(&cli_args).context("Failed to load configuration")?;
    let roster = config.build_roster()?;
    let mut app = App::new(&config, roster);
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut app, &mut terminal, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    info!("Rollcall shut down cleanly");
    Ok(())
}
