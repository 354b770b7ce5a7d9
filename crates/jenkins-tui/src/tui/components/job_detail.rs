//! Job detail pane: job info, last build panel and the build list

use jenkins_tui_core::{
    format::{format_duration, format_timestamp},
    BuildDetail, BuildSummary, JobDetail,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{Component, ListEntry, SelectableList, Viewport};
use crate::tui::formatting::{build_status_color, hint_style, label_style};
use crate::tui::layout::STATUS_BAR_ROWS;

/// Rows reserved for the info block
const INFO_ROWS: u16 = 12;

impl ListEntry for BuildSummary {
    fn filter_key(&self) -> String {
        format!("#{}", self.number)
    }

    fn detail_line(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobDetailPane {
    job: Option<JobDetail>,
    build: Option<BuildDetail>,
    builds: SelectableList<BuildSummary>,
    viewport: Viewport,
}

impl JobDetailPane {
    /// Replace the job; the build panel is dropped when the job changes
    pub fn with_job(mut self, job: JobDetail) -> Self {
        if self.job_name() != Some(job.name.as_str()) {
            self.build = None;
        }
        self.builds = self.builds.with_items(job.builds.clone());
        self.job = Some(job);
        self
    }

    pub fn with_build(mut self, build: BuildDetail) -> Self {
        self.build = Some(build);
        self
    }

    /// Forget everything unless the pane already shows `name`
    pub fn for_job(self, name: &str) -> Self {
        if self.job_name() == Some(name) {
            return self;
        }
        let mut cleared = Self::default();
        cleared.resize(self.viewport.width, self.viewport.height);
        cleared
    }

    pub fn job_name(&self) -> Option<&str> {
        self.job.as_ref().map(|job| job.name.as_str())
    }

    pub const fn job(&self) -> Option<&JobDetail> {
        self.job.as_ref()
    }

    pub const fn build(&self) -> Option<&BuildDetail> {
        self.build.as_ref()
    }

    pub const fn builds(&self) -> &SelectableList<BuildSummary> {
        &self.builds
    }

    pub fn builds_mut(&mut self) -> &mut SelectableList<BuildSummary> {
        &mut self.builds
    }

    pub fn selected_build(&self) -> Option<u32> {
        self.builds.selected().map(|build| build.number)
    }

    fn info_lines(&self) -> Vec<Line<'_>> {
        let Some(job) = &self.job else {
            return vec![Line::from("Loading job details...")];
        };

        let field = |label: &'static str, value: String| {
            Line::from(vec![Span::styled(label, label_style()), Span::raw(value)])
        };
        let description = if job.description.is_empty() {
            "No description".to_string()
        } else {
            job.description.clone()
        };

        let mut lines = vec![
            field("URL: ", job.url.clone()),
            field("Description: ", description),
        ];
        if !job.buildable {
            lines.push(Line::styled("Builds are disabled for this job", hint_style()));
        }
        lines.push(Line::from(""));

        match &self.build {
            Some(build) => lines.extend(build_lines(build)),
            None if job.last_build.is_none() => lines.push(Line::from("No builds yet")),
            None => lines.push(Line::styled("Loading last build...", hint_style())),
        }
        lines
    }
}

fn build_lines(build: &BuildDetail) -> Vec<Line<'_>> {
    let duration = if build.building {
        "in progress".to_string()
    } else {
        format_duration(build.duration)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("Build #{} ", build.number), label_style()),
            Span::styled(
                build.status.to_string(),
                Style::default().fg(build_status_color(build.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Started: ", label_style()),
            Span::raw(format_timestamp(build.start_time)),
            Span::styled("  Duration: ", label_style()),
            Span::raw(duration),
        ]),
    ];

    if !build.parameters.is_empty() {
        let params = build
            .parameters
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled("Parameters: ", label_style()),
            Span::raw(params),
        ]));
    }
    lines
}

impl Component for JobDetailPane {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.builds
            .set_page_size(self.viewport.body_rows(INFO_ROWS + 2 + STATUS_BAR_ROWS));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(INFO_ROWS), Constraint::Min(0)])
            .split(area);

        let title = self
            .job_name()
            .map_or_else(|| " Job ".to_string(), |name| format!(" Job: {name} "));
        let info = Paragraph::new(self.info_lines())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(info, chunks[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Builds {} ", self.builds.summary()));
        self.builds.render(frame, chunks[1], block, |build| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<8}", build.filter_key())),
                Span::styled(build.detail_line(), hint_style()),
            ]))
        });
    }
}
