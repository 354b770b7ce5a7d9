//! Terminal management
//!
//! Raw mode and the alternate screen are entered once at startup and left on
//! exit or panic. Input is read on a blocking thread and forwarded to the
//! controller as events.

use std::{
    io::{self, Stdout},
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};
use tracing::debug;

use super::types::AppEvent;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// How long the input thread waits for a key before checking the channel
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Setup terminal for TUI rendering
///
/// # Errors
/// Returns error if terminal setup fails
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

/// Cleanup terminal after TUI exits
///
/// # Errors
/// Returns error if terminal cleanup fails
pub fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")
}

/// Best-effort restore for paths that cannot report errors
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Restore the terminal before the default panic message is printed
pub fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original(info);
    }));
}

/// Forward key presses and resizes until the controller stops listening
pub fn spawn_input_reader(events: UnboundedSender<AppEvent>) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || {
        while !events.is_closed() {
            if !event::poll(INPUT_POLL).context("Failed to poll terminal events")? {
                continue;
            }

            let event = match event::read().context("Failed to read terminal event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Event::Resize(width, height) => AppEvent::Resize { width, height },
                _ => continue,
            };

            if events.send(event).is_err() {
                break;
            }
        }
        debug!("Input reader stopped");
        Ok(())
    })
}
