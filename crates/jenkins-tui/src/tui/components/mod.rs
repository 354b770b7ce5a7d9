//! View components
//!
//! Each pane owns the slice of state it renders. The controller replaces that
//! state wholesale through `with_*` methods and broadcasts every resize to
//! all panes, active or not.
//!
//! - `list`: selectable, filterable list shared by the job and build lists
//! - `dashboard`: server overview
//! - `job_list`: all jobs
//! - `job_detail`: one job, its last build and its builds
//! - `build_log`: console output with per-line highlighting
//! - `help`: key table and usage guide

mod build_log;
mod dashboard;
mod help;
mod job_detail;
mod job_list;
mod list;

use ratatui::{layout::Rect, Frame};

pub use build_log::{BuildLogPane, LineClass};
pub use dashboard::{DashboardPane, JobCounts};
pub use help::HelpPane;
pub use job_detail::JobDetailPane;
pub use job_list::JobListPane;
pub use list::{FilterState, ListControl, ListEntry, SelectableList};

/// Last dimensions a pane was told about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// Rows left after subtracting `chrome` rows of borders and headers
    pub fn body_rows(self, chrome: u16) -> usize {
        usize::from(self.height.saturating_sub(chrome)).max(1)
    }
}

pub trait Component {
    fn resize(&mut self, width: u16, height: u16);

    fn viewport(&self) -> Viewport;

    /// Draw into `area`; a pure function of the pane's state
    fn render(&self, frame: &mut Frame, area: Rect);
}
