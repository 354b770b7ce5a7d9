//! Text styling for domain values
//!
//! Pure mappings from statuses and log classes to ratatui styles.

use jenkins_tui_core::{BuildStatus, JobStatus};
use ratatui::style::{Color, Modifier, Style};

use super::components::LineClass;
use super::types::StatusLevel;

pub const fn job_status_color(status: JobStatus) -> Color {
    match status {
        JobStatus::Success => Color::Green,
        JobStatus::Failure => Color::Red,
        JobStatus::Unstable => Color::Yellow,
        JobStatus::Aborted | JobStatus::Disabled => Color::DarkGray,
        JobStatus::Running | JobStatus::Waiting => Color::Cyan,
        JobStatus::Unknown => Color::Gray,
    }
}

pub const fn build_status_color(status: BuildStatus) -> Color {
    match status {
        BuildStatus::Success => Color::Green,
        BuildStatus::Failed => Color::Red,
        BuildStatus::Aborted => Color::DarkGray,
        BuildStatus::Running | BuildStatus::Waiting => Color::Cyan,
        BuildStatus::Unknown => Color::Gray,
    }
}

pub fn status_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default().fg(Color::White),
        StatusLevel::Success => Style::default().fg(Color::Green),
        StatusLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Console line treatment; cosmetic only, the text is never changed
pub fn line_style(class: LineClass) -> Style {
    match class {
        LineClass::Error => Style::default().fg(Color::Red),
        LineClass::Warning => Style::default().fg(Color::LightRed),
        LineClass::CommandEcho => Style::default().fg(Color::Blue),
        LineClass::Success => Style::default().fg(Color::Green),
        LineClass::Plain => Style::default(),
    }
}

/// Label style for "Key: value" lines
pub fn label_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
}

pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
