//! Job list pane

use jenkins_tui_core::{
    format::{format_timestamp, truncate},
    JobSummary,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use super::{Component, ListEntry, SelectableList, Viewport};
use crate::tui::formatting::{hint_style, job_status_color};
use crate::tui::layout::STATUS_BAR_ROWS;

/// Pane borders plus the status bar
const CHROME_ROWS: u16 = 2 + STATUS_BAR_ROWS;

impl ListEntry for JobSummary {
    fn filter_key(&self) -> String {
        self.name.clone()
    }

    fn detail_line(&self) -> String {
        let mut parts = vec![self.status.to_string()];
        if self.in_progress {
            parts.push("(building)".to_string());
        }
        if let Some(at) = self.last_build_time {
            parts.push(format!("last build {}", format_timestamp(at)));
        }
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }
        parts.join("  ")
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobListPane {
    list: SelectableList<JobSummary>,
    viewport: Viewport,
}

impl JobListPane {
    pub fn with_jobs(mut self, jobs: Vec<JobSummary>) -> Self {
        self.list = self.list.with_items(jobs);
        self
    }

    pub const fn list(&self) -> &SelectableList<JobSummary> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut SelectableList<JobSummary> {
        &mut self.list
    }

    pub fn selected_name(&self) -> Option<String> {
        self.list.selected().map(|job| job.name.clone())
    }
}

impl Component for JobListPane {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.list.set_page_size(self.viewport.body_rows(CHROME_ROWS));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Jobs {} ", self.list.summary()));

        if self.list.visible().is_empty() {
            let message = if self.list.items().is_empty() {
                "No jobs loaded. Press the refresh key to reconnect."
            } else {
                "No jobs match the filter"
            };
            frame.render_widget(Paragraph::new(message).block(block), area);
            return;
        }

        let detail_width = usize::from(area.width.saturating_sub(4)).saturating_sub(30);
        self.list.render(frame, area, block, |job| {
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(job_status_color(job.status))),
                Span::raw(format!("{:<26}", truncate(&job.name, 26))),
                Span::styled(truncate(&job.detail_line(), detail_width), hint_style()),
            ]))
        });
    }
}
