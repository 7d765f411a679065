pub(crate) mod detail;
mod genres;
mod help;
mod list;
mod state;

use crate::app::{App, LoadState, View};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match &app.load_state {
        LoadState::Idle | LoadState::Loading => state::render_loading(frame),
        LoadState::Failed { message } => state::render_failed(frame, message),
        LoadState::Loaded(_) => match app.view {
            View::List => list::render(app, frame),
            View::Detail => detail::render(app, frame),
            View::Genres => {
                list::render(app, frame);
                genres::render(app, frame);
            }
        },
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
