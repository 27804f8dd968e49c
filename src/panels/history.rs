//! src/panels/history.rs
//!
//! History panel: the newest samples of a plot's primary series, latest
//! highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::plot::SharedPlot;

pub struct HistoryPanel {
    pub shared: SharedPlot,
}

impl HistoryPanel {
    pub fn new(shared: SharedPlot) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for HistoryPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let view = &self.shared.view;
        let (x_format, y_format) = (
            view.tick_format(livechart::Axis::X),
            view.tick_format(livechart::Axis::Y),
        );

        // borders take two rows
        let height = (area.height as usize).saturating_sub(2);
        let points = match self.shared.series.first() {
            Some(primary) => {
                let series = primary.lock();
                let points = series.points();
                points[points.len().saturating_sub(height)..].to_vec()
            }
            None => Vec::new(),
        };
        let last_index = points.len().saturating_sub(1);

        let lines: Vec<Line> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let latest = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
                let (xs, ys) = if i == last_index {
                    (latest, latest)
                } else {
                    (
                        Style::default().fg(Color::Green),
                        Style::default().fg(Color::Cyan),
                    )
                };
                Line::from(vec![
                    Span::styled("x: ", Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:>8}", x_format.format(x)), xs),
                    Span::raw(", "),
                    Span::styled("y: ", Style::default().fg(Color::Yellow)),
                    Span::styled(y_format.format(y), ys),
                ])
            })
            .collect();

        let block = Block::default().title("History").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
