//! UI rendering orchestration
//!
//! Rendering is a pure function of `AppState`: the same state always draws
//! the same frame.

use ratatui::Frame;

use super::components::Component;
use super::layout::screen_areas;
use super::state::AppState;
use super::types::View;
use super::widgets;

/// Render the whole UI
///
/// 1. Split the frame into content, error line and status bar
/// 2. Render the active view in the content area
/// 3. Render the error line and the status bar
/// 4. Overlay the confirm dialog when one is open
pub fn render_ui(f: &mut Frame, app: &AppState) {
    let areas = screen_areas(f.area(), app.error.is_some());

    match app.view {
        View::Dashboard => app.dashboard.render(f, areas.content),
        View::JobList => app.job_list.render(f, areas.content),
        View::JobDetail => app.job_detail.render(f, areas.content),
        View::BuildLog => app.build_log.render(f, areas.content),
        View::Help => app.help.render(f, areas.content),
    }

    if let (Some(error), Some(area)) = (app.error.as_ref(), areas.error) {
        widgets::render_error_line(f, &error.message, area);
    }

    widgets::render_status_bar(f, app, areas.status);

    if let Some(dialog) = app.confirm.as_ref() {
        widgets::render_confirm_dialog(f, dialog);
    }
}
