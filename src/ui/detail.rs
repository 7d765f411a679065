use crate::app::App;
use crate::card::{Card, RATING_NOT_AVAILABLE};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Rows around the summary box: metadata header and status line.
const DETAIL_CHROME: u16 = 7;

fn summary_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).wrap(Wrap { trim: false })
}

/// Furthest the summary can scroll in a `width` x `height` terminal before
/// its last wrapped line would leave the box.
pub fn max_scroll(summary: &str, width: u16, height: u16) -> u16 {
    let inner_width = width.saturating_sub(2);
    let inner_height = height.saturating_sub(DETAIL_CHROME + 2);
    let lines = summary_paragraph(summary).line_count(inner_width);
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_sub(inner_height)
}

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let show = match app.detail_show() {
        Some(s) => s,
        None => return,
    };
    let card = Card::from_show(show);

    // Layout: header(6) + summary(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    let or_na = |v: Option<String>| v.unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string());

    // ── Metadata header ──
    let meta_lines = vec![
        Line::from(vec![
            label(" Rating: "),
            Span::styled(
                format!("{} ★", card.display_rating),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            label("Genres: "),
            Span::styled(card.genre_tags.join(", "), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![
            label(" Language: "),
            Span::styled(or_na(show.language.clone()), Style::default().fg(Color::White)),
            Span::raw("   "),
            label("Premiered: "),
            Span::styled(
                or_na(show.premiered.map(|d| d.format("%d %b %Y").to_string())),
                Style::default().fg(Color::White),
            ),
            Span::raw("   "),
            label("Status: "),
            Span::styled(or_na(show.status.clone()), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            label(" Image: "),
            Span::styled(card.image_url.clone(), Style::default().fg(Color::Blue)),
            Span::raw("   "),
            label("Full size: "),
            Span::styled(
                or_na(show.image.as_ref().and_then(|i| i.original.clone())),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(vec![
            label(" Link: "),
            Span::styled(
                or_na(show.official_site.clone().or_else(|| show.url.clone())),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ];

    let meta_block = Paragraph::new(meta_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", card.name)),
    );
    frame.render_widget(meta_block, chunks[0]);

    // ── Summary ──
    let content = summary_paragraph(&card.summary_text)
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Summary ")
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(content, chunks[1]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓/PgUp/PgDn",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Scroll  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Back  "),
        Span::styled(format!("#{}", card.id), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
}
