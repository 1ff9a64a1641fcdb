use crate::constants::LOG_VIEW_CAPACITY;
use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;

/// Recent session activity for the side pane. Oldest entries fall off once
/// the capacity is reached.
#[derive(Debug)]
pub struct LogView {
    pub entries: VecDeque<String>,
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(LOG_VIEW_CAPACITY),
        }
    }

    pub fn add(&mut self, entry: String) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry);
        self.entries.push_back(stamped);
        if self.entries.len() > LOG_VIEW_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let log_lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.as_str()),
                ])
            })
            .collect();

        // Keep the newest entries in view.
        let inner_height = area.height.saturating_sub(2);
        let total = log_lines.len() as u16;
        let scroll = total.saturating_sub(inner_height);

        let logs = Paragraph::new(log_lines)
            .block(
                Block::default()
                    .borders(Borders::LEFT)
                    .title("Activity")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .style(Style::default().fg(Color::Gray))
            .scroll((scroll, 0));

        f.render_widget(logs, area);
    }
}
