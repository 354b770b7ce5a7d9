//! Console log pane
//!
//! Lines are classified once per content update. The class only picks a
//! style; the stored text is exactly what the server sent.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Component, Viewport};
use crate::tui::formatting::{hint_style, line_style};
use crate::tui::keymap::Motion;
use crate::tui::layout::STATUS_BAR_ROWS;

/// Borders, the omitted-lines notice and the footer hint
const CHROME_ROWS: u16 = 4;

/// Rows of the terminal not available to log lines: pane chrome, the
/// status bar and the error line
const SCREEN_CHROME_ROWS: u16 = CHROME_ROWS + STATUS_BAR_ROWS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Error,
    Warning,
    CommandEcho,
    Success,
    Plain,
}

impl LineClass {
    /// First match wins: error, warning, command echo, success
    pub fn classify(line: &str) -> Self {
        let lower = line.to_lowercase();
        let has_any = |needles: &[&str]| needles.iter().any(|needle| lower.contains(needle));

        if has_any(&["error", "exception", "failed"]) {
            Self::Error
        } else if has_any(&["warning"]) {
            Self::Warning
        } else if line.starts_with('+') || line.starts_with('>') {
            Self::CommandEcho
        } else if has_any(&["success", "passed", "completed"]) {
            Self::Success
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuildLogPane {
    job: String,
    build: u32,
    /// `None` until the log for `job`/`build` arrives
    lines: Option<Vec<(String, LineClass)>>,
    omitted: usize,
    max_lines: usize,
    scroll: usize,
    viewport: Viewport,
}

impl Default for BuildLogPane {
    fn default() -> Self {
        Self::new(jenkins_tui_core::config::DEFAULT_MAX_LOG_LINES)
    }
}

impl BuildLogPane {
    pub fn new(max_lines: usize) -> Self {
        Self {
            job: String::new(),
            build: 0,
            lines: None,
            omitted: 0,
            max_lines: max_lines.max(1),
            scroll: 0,
            viewport: Viewport::default(),
        }
    }

    /// Show a loading placeholder for `job` #`build`
    pub fn expecting(mut self, job: &str, build: u32) -> Self {
        if self.job != job || self.build != build {
            self.job = job.to_string();
            self.build = build;
            self.lines = None;
            self.omitted = 0;
            self.scroll = 0;
        }
        self
    }

    /// Replace the log content, keeping only the last `max_lines` lines
    pub fn with_log(mut self, job: &str, build: u32, text: &str) -> Self {
        let all: Vec<&str> = text.lines().collect();
        self.omitted = all.len().saturating_sub(self.max_lines);
        self.lines = Some(
            all.into_iter()
                .skip(self.omitted)
                .map(|line| (line.to_string(), LineClass::classify(line)))
                .collect(),
        );
        self.job = job.to_string();
        self.build = build;
        self.scroll = self.scroll.min(self.max_scroll());
        self
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub const fn build(&self) -> u32 {
        self.build
    }

    pub fn is_loaded(&self) -> bool {
        self.lines.is_some()
    }

    pub fn lines(&self) -> &[(String, LineClass)] {
        self.lines.as_deref().unwrap_or_default()
    }

    pub const fn omitted(&self) -> usize {
        self.omitted
    }

    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    fn body_rows(&self) -> usize {
        self.viewport.body_rows(SCREEN_CHROME_ROWS)
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.body_rows())
    }

    pub fn apply(&mut self, motion: Motion) {
        let page = self.body_rows();
        let max = self.max_scroll();
        self.scroll = match motion {
            Motion::Up => self.scroll.saturating_sub(1),
            Motion::Down => self.scroll.saturating_add(1),
            Motion::PageUp => self.scroll.saturating_sub(page),
            Motion::PageDown => self.scroll.saturating_add(page),
            Motion::Home => 0,
            Motion::End => max,
        }
        .min(max);
    }
}

impl Component for BuildLogPane {
    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Build Log: {} #{} ", self.job, self.build);
        let block = Block::default().borders(Borders::ALL).title(title);

        let Some(lines) = &self.lines else {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
            return;
        };
        if lines.is_empty() {
            frame.render_widget(
                Paragraph::new("No log data available for this build.").block(block),
                area,
            );
            return;
        }

        let rows = usize::from(area.height.saturating_sub(CHROME_ROWS)).max(1);
        let mut text = Vec::with_capacity(rows.saturating_add(2));
        if self.omitted > 0 {
            text.push(Line::styled(
                format!("... {} earlier lines omitted", self.omitted),
                hint_style(),
            ));
        }
        text.extend(
            lines
                .iter()
                .skip(self.scroll)
                .take(rows)
                .map(|(line, class)| Line::styled(line.as_str(), line_style(*class))),
        );
        text.push(Line::styled(
            format!(
                "line {}-{} of {}",
                self.scroll.saturating_add(1),
                self.scroll.saturating_add(rows).min(lines.len()),
                lines.len()
            ),
            hint_style(),
        ));

        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_beats_success() {
        assert_eq!(
            LineClass::classify("Build SUCCESS after Error in cleanup"),
            LineClass::Error
        );
    }

    #[test]
    fn test_classification_priority() {
        let cases = [
            ("java.lang.NullPointerException", LineClass::Error),
            ("3 tests FAILED", LineClass::Error),
            ("WARNING: deprecated flag", LineClass::Warning),
            ("+ warning echo", LineClass::Warning),
            ("+ make test", LineClass::CommandEcho),
            ("> Task :compileJava", LineClass::CommandEcho),
            ("+ echo success", LineClass::CommandEcho),
            ("All tests passed", LineClass::Success),
            ("Finished: SUCCESS", LineClass::Success),
            ("Download completed", LineClass::Success),
            ("Cloning repository", LineClass::Plain),
            ("  + indented", LineClass::Plain),
        ];
        for (line, expected) in cases {
            assert_eq!(LineClass::classify(line), expected, "line: {line}");
        }
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let pane = BuildLogPane::default().with_log("demo", 1, "ERROR: x\n+ ls");
        let texts: Vec<&str> = pane.lines().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(texts, vec!["ERROR: x", "+ ls"]);
    }

    #[test]
    fn test_max_lines_keeps_tail() {
        let text = (1..=10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let pane = BuildLogPane::new(3).with_log("demo", 1, &text);
        assert_eq!(pane.omitted(), 7);
        assert_eq!(
            pane.lines().first().map(|(l, _)| l.as_str()),
            Some("line 8")
        );
    }

    #[test]
    fn test_expecting_resets_until_log_arrives() {
        let pane = BuildLogPane::default()
            .with_log("demo", 42, "old")
            .expecting("demo", 43);
        assert!(!pane.is_loaded());
        assert_eq!(pane.build(), 43);

        let pane = pane.with_log("demo", 43, "new");
        assert!(pane.is_loaded());
    }

    #[test]
    fn test_expecting_same_build_keeps_log() {
        let pane = BuildLogPane::default()
            .with_log("demo", 42, "text")
            .expecting("demo", 42);
        assert!(pane.is_loaded());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let text = (0..50).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut pane = BuildLogPane::default().with_log("demo", 1, &text);
        pane.resize(80, 14);

        pane.apply(Motion::Up);
        assert_eq!(pane.scroll(), 0);

        pane.apply(Motion::End);
        assert_eq!(pane.scroll(), 44);

        pane.apply(Motion::PageDown);
        assert_eq!(pane.scroll(), 44);

        pane.apply(Motion::PageUp);
        assert_eq!(pane.scroll(), 38);

        pane.resize(80, 60);
        assert_eq!(pane.scroll(), 0);
    }
}
