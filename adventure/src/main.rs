//! Stone Age Adventure - A terminal text adventure built on combat_core
//!
//! Type commands at the prompt: travel between areas, gather weapons and
//! armour, and fight whatever lives there. Beat the final guardian to win.

mod command;
mod game;
mod inventory;
mod settings;
mod ui;
mod world;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::Game;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `info` unless the directives (usually `RUST_LOG`) say otherwise
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = log_filter(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default());

    // File only; stderr would scribble over the TUI
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Log file: {}/client.log", log_dir.display());
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    setup_logging(&settings.log_dir)?;
    tracing::info!(seed = settings.seed, "starting");

    // Create game state before terminal setup so errors are visible
    let mut game = match &settings.data_dir {
        Some(dir) => Game::load(dir, settings.seed)
            .with_context(|| format!("cannot load game data from {}", dir.display()))?,
        None => Game::new(settings.seed).context("built-in game data is invalid")?,
    };

    if let Err(e) = enable_raw_mode() {
        eprintln!("Error: Cannot enable raw mode: {}", e);
        eprintln!("This game requires a terminal. Run it directly, not piped or in a non-TTY context.");
        return Err(e.into());
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("cannot enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e).context("cannot create terminal");
        }
    };

    let mut input = String::new();

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &game, &input))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Enter => {
                        game.submit(&input);
                        input.clear();
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => input.push(c),
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(phase = ?game.phase(), "quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honours_directives() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter("combat_core=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(log_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
