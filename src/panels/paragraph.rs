//! src/panels/paragraph.rs
//!
//! Key binding help panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Renders `key=description` pairs on wrapping lines.
pub struct ParagraphPanel {
    pub keys: Vec<(String, String)>,
    pub title: String,
}

impl ParagraphPanel {
    pub fn new(keys: &[(&str, &str)], title: &str) -> Self {
        Self {
            keys: keys
                .iter()
                .map(|(k, d)| (k.to_string(), d.to_string()))
                .collect(),
            title: title.to_string(),
        }
    }
}

impl crate::ui::Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = self
            .keys
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(key.as_str(), key_style),
                    Span::raw(format!("  {desc}")),
                ])
            })
            .collect();
        let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(self.title.clone())
                .borders(Borders::ALL),
        );
        f.render_widget(p, area);
    }
}
