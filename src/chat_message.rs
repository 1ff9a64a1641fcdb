use crate::models::{Message, MessageStatus, Sender};
use chrono::Local;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Turns one thread entry into styled terminal lines, wrapped to `width`.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let base_style = base_style(message);
    let indent = if message.is_from_user() { "  " } else { "" };

    render_header(message, &mut lines, base_style, indent);
    render_content(&message.text, &mut lines, width, base_style, indent);
    render_video(message, &mut lines, base_style, indent);

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), base_style),
        Span::styled("╰─".to_string(), base_style),
    ]));

    lines
}

fn base_style(message: &Message) -> Style {
    let style = Style::default().fg(match message.sender {
        Sender::User => Color::Rgb(255, 223, 128),
        Sender::Ai => Color::Rgb(144, 238, 144),
    });

    match message.status {
        MessageStatus::Error => style.fg(Color::Red),
        MessageStatus::PendingVideoGeneration => style.add_modifier(Modifier::DIM),
        _ => style,
    }
}

fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "You",
        Sender::Ai => "Course AI",
    }
}

/// Short badge after the timestamp. Plain text answers get none.
pub fn status_badge(status: MessageStatus) -> Option<&'static str> {
    match status {
        MessageStatus::PendingVideoGeneration => Some("⏳ video generating…"),
        MessageStatus::VideoReady => Some("▶ video ready"),
        MessageStatus::TextOnly => None,
        MessageStatus::Error => Some("✗ failed"),
    }
}

fn render_header(message: &Message, lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    let timestamp = message
        .created_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    let mut spans = vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(
            sender_label(message.sender).to_string(),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
    ];

    if let Some(badge) = status_badge(message.status) {
        spans.push(Span::styled(" ".to_string(), style));
        spans.push(Span::styled(badge.to_string(), style.add_modifier(Modifier::ITALIC)));
    }

    lines.push(Line::from(spans));
}

fn render_content(
    text: &str,
    lines: &mut Vec<Line<'static>>,
    width: u16,
    style: Style,
    indent: &str,
) {
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut text_buffer = String::new();

    for line in text.lines() {
        if line.trim().starts_with("```") {
            flush_text_buffer(lines, &text_buffer, width, style, indent);
            flush_code_buffer(lines, &code_buffer, style, indent);
            text_buffer.clear();
            code_buffer.clear();
            in_code_block = !in_code_block;
            continue;
        }

        let buffer = if in_code_block {
            &mut code_buffer
        } else {
            &mut text_buffer
        };
        buffer.push_str(line);
        buffer.push('\n');
    }

    flush_text_buffer(lines, &text_buffer, width, style, indent);
    flush_code_buffer(lines, &code_buffer, style, indent);
}

fn flush_text_buffer(
    lines: &mut Vec<Line<'static>>,
    buffer: &str,
    width: u16,
    style: Style,
    indent: &str,
) {
    if buffer.is_empty() {
        return;
    }

    let wrap_width = (width as usize).saturating_sub(4 + indent.len()).max(1);

    for paragraph in buffer.lines() {
        if paragraph.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│".to_string(), style),
            ]));
            continue;
        }

        for wrapped_line in wrap(paragraph, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }
}

fn flush_code_buffer(lines: &mut Vec<Line<'static>>, buffer: &str, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let code_style = Style::default()
        .fg(Color::Rgb(209, 154, 102))
        .add_modifier(Modifier::BOLD);

    for code_line in buffer.lines() {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {}", code_line), code_style),
        ]));
    }
}

fn render_video(message: &Message, lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    let Some(url) = message.video_url.as_ref() else {
        return;
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("│ ".to_string(), style),
        Span::styled("▶ ".to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(
            url.clone(),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ]));
}
