//! src/panels/info.rs
//!
//! Plot info panel: run state, current view window and per-series status.

use livechart::{Axis, Range};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::plot::SharedPlot;

/// Read-only info panel; `highlighted` affects border style.
pub struct InfoPanel {
    pub shared: SharedPlot,
    pub highlighted: bool,
}

impl InfoPanel {
    pub fn new(shared: SharedPlot) -> Self {
        Self {
            shared,
            highlighted: false,
        }
    }
}

fn describe(range: Option<Range>, fixed: bool) -> String {
    let mode = if fixed { "fixed" } else { "auto" };
    match range {
        Some(r) => format!("[{:.3}, {:.3}] {mode}", r.low, r.high),
        None => format!("- {mode}"),
    }
}

impl crate::ui::Panel for InfoPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let view = &self.shared.view;
        let ranges = view.ranges();
        let state = if view.is_paused() { "paused" } else { "live" };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(view.title(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {state}")),
            ]),
            Line::from(format!("x={}", describe(ranges.x, view.is_fixed(Axis::X)))),
            Line::from(format!("y={}", describe(ranges.y, view.is_fixed(Axis::Y)))),
        ];
        for handle in &self.shared.series {
            let ticks = handle.connector.rolling_index();
            let (len, leading) = {
                let series = handle.lock();
                let leading = livechart::LiveSeries::leading_line(&*series)
                    .and_then(|l| l.vertical())
                    .map(|l| l.text.clone());
                (livechart::LiveSeries::len(&*series), leading)
            };
            let mut text = format!(" {}: ticks={ticks} points={len}", handle.name);
            if let Some(label) = leading {
                text.push_str(&format!(" lead={label}"));
            }
            let style = if handle.is_visible() {
                Style::default().fg(handle.color)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::styled(text, style));
        }

        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
