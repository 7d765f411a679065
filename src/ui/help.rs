use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn binding(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<10}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("  Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("  Show List"),
        binding("↑/k ↓/j", "Navigate up/down"),
        binding("PgUp/PgDn", "Move a page up/down"),
        binding("Home/End", "Jump to first/last show"),
        binding("/", "Search by name (updates as you type)"),
        binding("Esc", "Clear the search"),
        binding("o / O", "Next / previous sort order"),
        binding("g", "Choose a genre"),
        binding("a", "Show all genres"),
        binding("Enter", "Open show detail"),
        Line::from(""),
        section("  Genre Selector"),
        binding("↑/↓", "Move selection"),
        binding("Enter", "Apply genre"),
        binding("Esc", "Cancel"),
        Line::from(""),
        section("  Detail View"),
        binding("↑/↓", "Scroll summary"),
        binding("PgUp/PgDn", "Scroll page up/down"),
        binding("Esc/q", "Back to list"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help · Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
