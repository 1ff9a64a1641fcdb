use crate::app::App;
use crate::constants::APP_TITLE;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(inner);

    let title = Paragraph::new(APP_TITLE)
        .style(
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let details = Line::from(vec![
        Span::styled("Course: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.course_id.clone(),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Server: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.base_url.clone(), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(details).alignment(Alignment::Right),
        chunks[1],
    );
}
