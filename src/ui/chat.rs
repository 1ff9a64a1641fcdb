use crate::app::App;
use crate::chat_message::render_message;
use crate::constants::INPUT_PLACEHOLDER;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),    // Messages
                Constraint::Length(1), // Status
                Constraint::Length(3), // Input
            ]
            .as_ref(),
        )
        .split(area);

    draw_messages(f, chunks[0], app);
    app.status_indicator.render(f, chunks[1]);
    draw_input(f, chunks[2], app);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for message in app.session.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No messages yet. Ask a question about the course below.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Only the visible window goes to the paragraph, so very long threads
    // never need a u16 scroll offset.
    let height = area.height as usize;
    let max_from_bottom = lines.len().saturating_sub(height);
    let from_bottom = (app.scroll_from_bottom as usize).min(max_from_bottom);
    let end = lines.len() - from_bottom;
    let start = end.saturating_sub(height);
    lines.truncate(end);
    lines.drain(..start);

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let input = app.session.input();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ask")
        .border_style(Style::default().fg(Color::DarkGray));

    let visible_width = area.width.saturating_sub(4);
    let text_width = u16::try_from(input.width()).unwrap_or(u16::MAX);
    let scroll_offset = text_width.saturating_sub(visible_width);

    let line = if input.is_empty() {
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::DarkGray)),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled("→ ", Style::default().fg(Color::DarkGray)),
            Span::styled(input, Style::default().fg(Color::White)),
        ])
    };

    f.render_widget(
        Paragraph::new(line).block(block).scroll((0, scroll_offset)),
        area,
    );

    let cursor_x = area
        .x
        .saturating_add(3)
        .saturating_add(text_width.min(visible_width));
    f.set_cursor_position((cursor_x, area.y + 1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::models::{Message, MessageStatus};
    use ratatui::{backend::TestBackend, Terminal};

    fn area_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_newest_reply_visible_after_huge_thread() {
        let (mut app, _rx) = test_app();
        let long_answer = vec!["line"; 70_000].join("\n");
        app.session
            .append(Message::ai("m1", long_answer, MessageStatus::TextOnly, None));
        app.session
            .append(Message::ai("m2", "NEWEST-REPLY", MessageStatus::TextOnly, None));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw_chat(f, f.area(), &app)).unwrap();

        assert!(area_text(&terminal).contains("NEWEST-REPLY"));
    }

    #[test]
    fn test_scrolled_up_hides_newest_lines() {
        let (mut app, _rx) = test_app();
        for i in 0..40 {
            app.session.append(Message::user(format!("question {}", i)));
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw_chat(f, f.area(), &app)).unwrap();
        assert!(area_text(&terminal).contains("question 39"));

        app.scroll_from_bottom = 30;
        terminal.draw(|f| draw_chat(f, f.area(), &app)).unwrap();
        assert!(!area_text(&terminal).contains("question 39"));

        // Scrolling past the top clamps to the first message.
        app.scroll_from_bottom = u16::MAX;
        terminal.draw(|f| draw_chat(f, f.area(), &app)).unwrap();
        assert!(area_text(&terminal).contains("question 0"));
    }

    #[test]
    fn test_huge_input_does_not_overflow_cursor() {
        let (mut app, _rx) = test_app();
        app.session.set_input("x".repeat(100_000));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw_chat(f, f.area(), &app)).unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80);
    }
}
