//! Widgets shared by every view: status bar, error line and confirm dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::formatting::status_style;
use super::layout;
use super::state::AppState;
use super::types::{ConfirmDialog, View};

/// Key hints for the active view, using the live bindings
fn hints(app: &AppState) -> Vec<(String, &'static str)> {
    let quit = (app.keymap.quit_key().to_string(), "quit");
    let help = (app.keymap.help_key().to_string(), "help");
    let mut hints: Vec<(String, &'static str)> = match app.view {
        View::Dashboard => vec![],
        View::JobList => vec![
            ("enter".to_string(), "open"),
            ("/".to_string(), "filter"),
            ("b".to_string(), "build"),
            ("x".to_string(), "delete"),
        ],
        View::JobDetail => vec![
            ("enter".to_string(), "log"),
            ("b".to_string(), "build"),
            ("s".to_string(), "stop"),
            ("esc".to_string(), "back"),
        ],
        View::BuildLog => vec![
            ("pgup/pgdn".to_string(), "scroll"),
            ("s".to_string(), "stop"),
            ("esc".to_string(), "back"),
        ],
        View::Help => vec![("esc".to_string(), "back")],
    };
    hints.push(help);
    hints.push(quit);
    hints
}

/// Render the status bar: connection state, status message and key hints
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let connection = if app.connected {
        Span::styled("● ", Style::default().fg(Color::Green))
    } else {
        Span::styled("● ", Style::default().fg(Color::Red))
    };

    let mut spans = vec![
        connection,
        Span::styled(app.status.text.as_str(), status_style(app.status.level)),
        Span::raw("  | "),
    ];
    for (key, action) in hints(app) {
        spans.push(Span::raw(format!("{key}:")));
        spans.push(Span::styled(
            format!(" {action} "),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

pub fn render_error_line(f: &mut Frame, message: &str, area: Rect) {
    let line = Paragraph::new(Span::styled(
        message,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(line, area);
}

/// Render confirmation dialog for server-side actions
pub fn render_confirm_dialog(f: &mut Frame, dialog: &ConfirmDialog) {
    let area = layout::centered_rect(60, 20, f.area());

    let text = vec![
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Y to confirm, N to cancel",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Confirm ")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
