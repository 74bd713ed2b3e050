//! Small layout and formatting helpers shared by the rendering code.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::LibraryError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Render a store error as a one-line footer message.
pub(crate) fn surface_error(err: &LibraryError) -> String {
    err.to_string()
}

/// Clip cell text to a column width, marking the cut with an ellipsis.
pub(crate) fn fit_cell(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }
    let mut clipped: String = chars[..width.saturating_sub(1)].iter().collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_cell_clips_long_text_with_an_ellipsis() {
        assert_eq!(fit_cell("short", 10), "short");
        assert_eq!(fit_cell("exactly10!", 10), "exactly10!");
        assert_eq!(fit_cell("rather too long", 8), "rather …");
        assert_eq!(fit_cell("anything", 0), "");
    }
}
