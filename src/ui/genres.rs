use super::centered_rect;
use crate::app::App;
use crate::catalog::{ALL_GENRES_LABEL, GenreFilter};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

/// Genre selector popup drawn over the list view.
pub fn render(app: &App, frame: &mut Frame) {
    let area = centered_rect(40, 60, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .genre_options()
        .into_iter()
        .map(|option| {
            let label = option.unwrap_or(ALL_GENRES_LABEL);
            let active = match (&app.criteria.genre, option) {
                (GenreFilter::All, None) => true,
                (GenreFilter::Only(current), Some(g)) => current == g,
                _ => false,
            };
            let style = if active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::styled(label.to_string(), style))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Genre ")
                .title_bottom(
                    Line::from(" Enter select · Esc cancel ")
                        .alignment(Alignment::Right)
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.genre_selected));
    frame.render_stateful_widget(list, area, &mut state);
}
