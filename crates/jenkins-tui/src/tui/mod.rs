//! Interactive terminal client
//!
//! # Architecture
//!
//! A single controller loop owns `AppState`. Key presses, resizes, ticks
//! and network results all arrive on one channel and are applied one at a
//! time; the commands each update returns are spawned and report back on
//! the same channel.
//!
//! - `types`: events, commands, views and request tokens
//! - `keymap`: configurable key bindings
//! - `state`: `AppState` and result handling
//! - `events`: keyboard handling
//! - `actions`: command execution against the service
//! - `components`: the view panes
//! - `rendering`, `layout`, `widgets`, `formatting`: drawing
//! - `terminal`: terminal setup and input

pub mod actions;
pub mod components;
mod events;
pub mod formatting;
pub mod keymap;
pub mod layout;
pub mod rendering;
pub mod state;
pub mod terminal;
pub mod types;
pub mod widgets;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use jenkins_tui_core::{Config, JenkinsApi, JenkinsService};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use actions::CommandRunner;
use rendering::render_ui;
use state::AppState;
use terminal::{
    cleanup_terminal, install_panic_hook, restore_terminal, setup_terminal, spawn_input_reader,
};
use types::AppEvent;

/// Run the interactive client until the user quits
///
/// # Errors
/// Returns error if:
/// - The service cannot be created for the configured server
/// - Terminal setup or cleanup fails
/// - Drawing fails
pub async fn run(config: &Config) -> Result<()> {
    let service = JenkinsService::from_config(config)
        .context("Failed to initialize Jenkins service")?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = CommandRunner::new(Arc::new(service), tx.clone());

    install_panic_hook();
    let mut terminal = setup_terminal().inspect_err(|_| restore_terminal())?;

    let result = match crossterm::terminal::size().context("Failed to get terminal size") {
        Ok((width, height)) => {
            let state = AppState::from_config(config)
                .update(AppEvent::Resize { width, height })
                .0;
            let input = spawn_input_reader(tx);
            let result = run_event_loop(&mut terminal, state, &runner, &mut rx).await;
            rx.close();
            match input.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => info!(error = %err, "Input reader failed"),
                Err(err) => info!(error = %err, "Input reader did not finish"),
            }
            result
        }
        Err(err) => Err(err),
    };

    let cleanup = cleanup_terminal(&mut terminal);
    result?;
    cleanup
}

/// Drive the controller: draw, wait for an event, apply it, run its commands
///
/// Returns the final state once the user quits or the channel closes.
///
/// # Errors
/// Returns error if drawing fails
pub async fn run_event_loop<B: Backend, A: JenkinsApi + 'static>(
    terminal: &mut Terminal<B>,
    state: AppState,
    runner: &CommandRunner<A>,
    events: &mut UnboundedReceiver<AppEvent>,
) -> Result<AppState> {
    let (mut state, commands) = state.start();
    commands.into_iter().for_each(|command| runner.run(command));

    loop {
        terminal
            .draw(|f| render_ui(f, &state))
            .map_err(|e| anyhow!("Failed to draw: {e}"))?;

        let Some(event) = events.recv().await else {
            break;
        };

        let (next, commands) = state.update(event);
        state = next;
        commands.into_iter().for_each(|command| runner.run(command));

        if state.should_quit() {
            info!("Quitting");
            break;
        }
    }

    Ok(state)
}
