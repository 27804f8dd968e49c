//! src/panels/title.rs
//!
//! Header panel: app title and where the control server listens.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel {
    pub title: String,
    pub remote: String,
}

impl TitlePanel {
    pub fn new(title: &str, remote: &str) -> Self {
        Self {
            title: title.to_string(),
            remote: remote.to_string(),
        }
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::raw(self.title.clone()),
            Span::styled(
                format!("   control: tcp://{}", self.remote),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().title("livechart").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
