//! # Jenkins TUI
//!
//! Full-screen terminal client for a Jenkins server. The controller in
//! [`tui::state`] is a pure state machine; [`tui::run`] wires it to the
//! terminal and to [`jenkins_tui_core::JenkinsService`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cli;
pub mod tui;

pub use cli::Cli;
pub use tui::{run, state::AppState};
