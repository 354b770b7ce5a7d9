//! Server overview pane

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use jenkins_tui_core::{
    format::{format_duration, format_timestamp},
    JobStatus, JobSummary, ServerSnapshot,
};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, Viewport};
use crate::tui::formatting::{job_status_color, label_style};

/// Job totals shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCounts {
    pub total: usize,
    pub building: usize,
    by_status: HashMap<JobStatus, usize>,
}

impl JobCounts {
    pub fn from_jobs(jobs: &[JobSummary]) -> Self {
        Self {
            total: jobs.len(),
            building: jobs.iter().filter(|job| job.in_progress).count(),
            by_status: jobs.iter().map(|job| job.status).counts(),
        }
    }

    pub fn of(&self, status: JobStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardPane {
    snapshot: Option<ServerSnapshot>,
    jobs: JobCounts,
    last_updated: Option<DateTime<Utc>>,
    viewport: Viewport,
}

impl DashboardPane {
    /// Connected to the server described by `snapshot` at `at`
    pub fn with_snapshot(mut self, snapshot: ServerSnapshot, at: DateTime<Utc>) -> Self {
        self.snapshot = Some(snapshot);
        self.last_updated = Some(at);
        self
    }

    /// Connection lost; the last update time is kept
    pub fn disconnected(mut self) -> Self {
        self.snapshot = None;
        self
    }

    pub fn with_jobs(mut self, jobs: &[JobSummary]) -> Self {
        self.jobs = JobCounts::from_jobs(jobs);
        self
    }

    pub const fn snapshot(&self) -> Option<&ServerSnapshot> {
        self.snapshot.as_ref()
    }

    pub const fn job_counts(&self) -> &JobCounts {
        &self.jobs
    }

    fn server_lines(&self) -> Vec<Line<'_>> {
        let indicator = if self.snapshot.is_some() {
            Span::styled("● Connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("● Disconnected", Style::default().fg(Color::Red))
        };
        let mut lines = vec![Line::from(vec![
            Span::styled("Server Information ", label_style()),
            indicator,
        ])];

        let Some(server) = &self.snapshot else {
            lines.push(Line::from("Not connected to Jenkins server"));
            return lines;
        };

        let field = |label: &'static str, value: String| {
            Line::from(vec![Span::styled(label, label_style()), Span::raw(value)])
        };
        let uptime = server.uptime.map_or_else(
            || "unknown".to_string(),
            |uptime| {
                format_duration(i64::try_from(uptime.as_millis()).unwrap_or(i64::MAX))
            },
        );

        lines.push(field("URL: ", server.url.clone()));
        lines.push(field("Version: ", server.version.clone()));
        lines.push(field("Mode: ", server.mode.clone()));
        if !server.username.is_empty() {
            lines.push(field("User: ", server.username.clone()));
        }
        lines.push(field("Uptime: ", uptime));
        lines.push(field(
            "Nodes: ",
            format!("{} total, {} free", server.total_nodes, server.free_nodes),
        ));
        lines
    }

    fn job_lines(&self) -> Vec<Line<'_>> {
        let count = |status: JobStatus, label: &'static str| {
            vec![
                Span::styled("● ", Style::default().fg(job_status_color(status))),
                Span::raw(format!("{label}: {}  ", self.jobs.of(status))),
            ]
        };
        let breakdown = [
            (JobStatus::Success, "success"),
            (JobStatus::Failure, "failure"),
            (JobStatus::Unstable, "unstable"),
            (JobStatus::Aborted, "aborted"),
            (JobStatus::Disabled, "disabled"),
        ]
        .into_iter()
        .flat_map(|(status, label)| count(status, label))
        .collect::<Vec<_>>();

        vec![
            Line::from(vec![
                Span::styled("Jobs: ", label_style()),
                Span::raw(format!(
                    "{} total, {} building",
                    self.jobs.total, self.jobs.building
                )),
            ]),
            Line::from(breakdown),
        ]
    }
}

impl Component for DashboardPane {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let last_updated = self.last_updated.map_or_else(
            || "never".to_string(),
            |at| format_timestamp(at.timestamp_millis()),
        );

        let mut lines = self.server_lines();
        lines.push(Line::from(""));
        lines.extend(self.job_lines());
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last updated: ", label_style()),
            Span::raw(last_updated),
        ]));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Dashboard "));
        frame.render_widget(paragraph, area);
    }
}
