// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, coordinator progress)
// - Rendering the UI

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod mode;
pub mod theme;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::query::Progress;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use views::ContributorsView;

/// Redraw cadence for the spinner and toast expiry
const TICK: Duration = Duration::from_millis(200);

/// How long the input thread blocks in `event::poll` before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// even when the loop fails.
pub async fn run_tui(config: &Config, log_buffer: LogBuffer) -> Result<()> {
    let mut app = App::new(config, log_buffer)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Forward terminal events from a blocking reader thread
///
/// crossterm's reader is synchronous; keeping it off the runtime lets the
/// event loop await input, ticks and fetches side by side. The thread exits
/// once the receiver is dropped.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Terminal poll failed: {}", e);
                break;
            }
        }
    });
    rx
}

/// Drive the contributor coordinator when that view exists
async fn advance_contributors(view: &mut Option<ContributorsView>) -> Progress {
    match view {
        Some(view) => view.coordinator.advance().await,
        None => std::future::pending().await,
    }
}

/// Main event loop
///
/// Waits on four sources with tokio::select!:
/// 1. Terminal input (keys, resize)
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Repository coordinator progress (throttle deadline or settled fetch)
/// 4. Contributor coordinator progress
///
/// `advance()` is cancellation-safe, so losing a race to another branch
/// drops nothing.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut input_rx = spawn_input_reader();
    let mut tick_interval = tokio::time::interval(TICK);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = input_rx.recv() => match input {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(_) => {} // Resize: the next draw picks it up
                None => anyhow::bail!("Terminal input closed"),
            },

            _ = tick_interval.tick() => app.clear_expired_toast(),

            progress = app.repositories.coordinator.advance() => {
                app.on_repository_progress(progress);
            }

            progress = advance_contributors(&mut app.contributors) => {
                app.on_contributor_progress(progress);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
