use crate::app::{App, InputMode};
use crate::card::{Card, NO_RESULTS, RenderedList};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let count_color = if app.rendered.as_ref().is_some_and(RenderedList::is_empty) {
        Color::Red
    } else {
        Color::DarkGray
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Show Catalog ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{}/{}]", app.shown_count(), app.total_count()),
            Style::default().fg(count_color),
        ),
        Span::raw("   "),
        Span::styled("Genre: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.criteria.genre.label(),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("   "),
        Span::styled("Sort: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.criteria.sort.label(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " Search (Enter/Esc to finish): "
    } else {
        " Search (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", search_label, app.criteria.search_term))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x
            + 1
            + search_label.width() as u16
            + app.criteria.search_term.width() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }

    // ── Cards ──
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Shows ");

    match app.rendered.as_ref() {
        Some(RenderedList::Cards(cards)) => {
            let inner_width = (chunks[2].width as usize).saturating_sub(4);
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| card_item(card, inner_width))
                .collect();

            let position = format!(
                " {} of {} ",
                app.list_selected + 1,
                cards.len()
            );
            let list_widget = List::new(items)
                .block(list_block.title_bottom(Line::from(position).alignment(Alignment::Right)))
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("▸ ");

            let mut list_state = ListState::default();
            list_state.select(Some(app.list_selected));
            frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);
        }
        Some(RenderedList::NoResults) | None => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(NO_RESULTS, Style::default().fg(Color::Yellow))),
            ])
            .alignment(Alignment::Center)
            .block(list_block);
            frame.render_widget(empty, chunks[2]);
        }
    }

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("o"),
        Span::raw(" Sort  "),
        key("g"),
        Span::raw(" Genre  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Three-line list entry: title line, summary, image link.
fn card_item(card: &Card, width: usize) -> ListItem<'_> {
    let mut title = vec![
        Span::styled(
            card.name.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ★ {}", card.display_rating),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
    ];
    for tag in &card.genre_tags {
        title.push(Span::styled(
            format!("[{}] ", tag),
            Style::default().fg(Color::Magenta),
        ));
    }

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::raw(format!(
            "  {}",
            truncate_str(&card.summary_text, width.saturating_sub(2))
        ))),
        Line::from(Span::styled(
            format!("  {}", card.image_url),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
