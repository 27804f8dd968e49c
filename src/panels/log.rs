//! src/panels/log.rs
//!
//! Log panel: tail of the in-memory log buffer.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::logger::LogLines;

pub struct LogPanel {
    pub lines: LogLines,
}

impl LogPanel {
    pub fn new(lines: LogLines) -> Self {
        Self { lines }
    }
}

fn level_color(line: &str) -> Color {
    if line.contains(" WARN ") || line.contains(" ERROR ") {
        Color::Red
    } else if line.contains(" INFO ") {
        Color::Green
    } else {
        Color::Gray
    }
}

impl crate::ui::Panel for LogPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let height = (area.height as usize).saturating_sub(2);
        let lines: Vec<Line> = {
            let buffer = self.lines.lock().unwrap_or_else(|p| p.into_inner());
            let skip = buffer.len().saturating_sub(height);
            buffer
                .iter()
                .skip(skip)
                .map(|l| Line::styled(l.clone(), Style::default().fg(level_color(l))))
                .collect()
        };
        let block = Block::default().title("Log").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
