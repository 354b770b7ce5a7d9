//! Help pane: live key table, usage guide and about text

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, Viewport};
use crate::tui::formatting::{hint_style, label_style};
use crate::tui::keymap::KeyMap;

const USAGE: &[&str] = &[
    "Navigation",
    "  Arrow keys move through lists and scroll logs",
    "  Enter opens the selected job or build",
    "  Esc goes back to the previous view",
    "",
    "Views",
    "  Dashboard: server status and job totals",
    "  Job List: every job on the server",
    "  Job Detail: one job, its last build and its build history",
    "  Build Log: console output of one build",
    "",
    "Filtering",
    "  Press / in a list, type part of a name, then Enter",
    "  Esc clears the filter",
    "",
    "Actions",
    "  Trigger, stop and delete always ask for confirmation",
    "  Logs highlight errors, warnings, commands and successes",
];

#[derive(Debug, Clone, Default)]
pub struct HelpPane {
    rows: Vec<(String, &'static str)>,
    viewport: Viewport,
}

impl HelpPane {
    pub fn with_keymap(mut self, keys: &KeyMap) -> Self {
        self.rows = keys.help_rows();
        self
    }

    fn key_lines(&self) -> Vec<Line<'_>> {
        self.rows
            .iter()
            .map(|(key, action)| {
                Line::from(vec![
                    Span::styled(format!("{key:>12}  "), label_style()),
                    Span::raw(*action),
                ])
            })
            .collect()
    }
}

impl Component for HelpPane {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let keys = Paragraph::new(self.key_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keyboard Shortcuts "),
        );
        frame.render_widget(keys, chunks[0]);

        let mut guide: Vec<Line> = USAGE.iter().map(|line| Line::from(*line)).collect();
        guide.push(Line::from(""));
        guide.push(Line::styled(
            format!(
                "Jenkins TUI {}: a terminal client for Jenkins CI",
                env!("CARGO_PKG_VERSION")
            ),
            hint_style(),
        ));

        let usage = Paragraph::new(guide)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Usage Guide "));
        frame.render_widget(usage, chunks[1]);
    }
}
