//! Screen geometry
//!
//! Splits the frame into content, an optional error line and the status bar,
//! and centers dialogs.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the bordered status bar
pub const STATUS_BAR_ROWS: u16 = 3;

/// Areas of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub content: Rect,
    pub error: Option<Rect>,
    pub status: Rect,
}

pub fn screen_areas(area: Rect, has_error: bool) -> ScreenAreas {
    if has_error {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(STATUS_BAR_ROWS),
            ])
            .split(area);
        ScreenAreas {
            content: chunks[0],
            error: Some(chunks[1]),
            status: chunks[2],
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(STATUS_BAR_ROWS)])
            .split(area);
        ScreenAreas {
            content: chunks[0],
            error: None,
            status: chunks[1],
        }
    }
}

/// Create a centered rectangle for dialogs
///
/// Uses saturating arithmetic so tiny terminals never overflow.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_y).saturating_div(2)),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100u16.saturating_sub(percent_y).saturating_div(2)),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x).saturating_div(2)),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100u16.saturating_sub(percent_x).saturating_div(2)),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let full_area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 50, full_area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 50);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 25);
    }

    #[test]
    fn test_error_line_sits_above_status_bar() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24), true);
        assert_eq!(areas.content.height, 20);
        assert_eq!(areas.error.map(|r| (r.y, r.height)), Some((20, 1)));
        assert_eq!(areas.status.y, 21);
        assert_eq!(areas.status.height, STATUS_BAR_ROWS);
    }

    #[test]
    fn test_no_error_line_without_error() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24), false);
        assert_eq!(areas.error, None);
        assert_eq!(areas.content.height, 21);
    }
}
