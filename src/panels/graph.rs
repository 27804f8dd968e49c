//! src/panels/graph.rs
//!
//! Graph panel: renders the live chart of one plot, a readout row for the
//! primary series, and leading lines.
//!
//! The chart window comes straight from the plot's view; the panel only
//! falls back to the data extent while the view has no range yet.

use livechart::series::{LeadingLine, LiveSeries, PointKind};
use livechart::{Axis as PlotAxis, DataBounds, Range, TickFormat};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::plot::SharedPlot;

/// Renders one shared plot.
pub struct GraphPanel {
    pub shared: SharedPlot,
}

/// Owned copy of one series, taken under its lock.
struct SeriesFrame {
    name: String,
    color: Color,
    kind: PointKind,
    points: Vec<(f64, f64)>,
    leading: Option<LeadingLine>,
}

impl GraphPanel {
    pub fn new(shared: SharedPlot) -> Self {
        Self { shared }
    }

    /// Copy visible series out so no lock is held while drawing.
    fn snapshot(&self) -> (Vec<SeriesFrame>, Option<Range>, Option<Range>) {
        let mut frames = Vec::new();
        let mut x_extent: Option<Range> = None;
        let mut y_extent: Option<Range> = None;
        for handle in self.shared.series.iter().filter(|h| h.is_visible()) {
            let series = handle.lock();
            x_extent = union(x_extent, series.data_bounds(PlotAxis::X, 0));
            y_extent = union(y_extent, series.data_bounds(PlotAxis::Y, 0));
            frames.push(SeriesFrame {
                name: handle.name.clone(),
                color: handle.color,
                kind: series.kind(),
                points: series.points(),
                leading: series.leading_line().and_then(|l| l.vertical()).cloned(),
            });
        }
        (frames, x_extent, y_extent)
    }

    /// Readout row: min/max of the primary series and its last point.
    fn readout(&self) -> String {
        let Some(primary) = self.shared.series.first() else {
            return "no series".to_string();
        };
        let series = primary.lock();
        let Some(range) = series.data_bounds(PlotAxis::Y, 0) else {
            return format!("{}: waiting for data", primary.name);
        };
        let last = series.x_data().last().copied().zip(series.values().last().copied());
        let mut text = format!(
            "{}  Min: {:.3}  Max: {:.3}",
            primary.name, range.low, range.high
        );
        if let Some((x, y)) = last {
            let (xs, ys) = self.shared.view.crosshair(x, y);
            text.push_str(&format!("  Last: {xs}, {ys}"));
        }
        text
    }
}

fn union(acc: Option<Range>, next: Option<Range>) -> Option<Range> {
    match (acc, next) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, b) => a.or(b),
    }
}

/// Chart bounds; ratatui needs a non-empty interval.
fn bounds(range: Option<Range>) -> [f64; 2] {
    let range = range.unwrap_or(Range::new(0.0, 1.0));
    if range.is_degenerate() {
        [range.low - 0.5, range.high + 0.5]
    } else {
        [range.low, range.high]
    }
}

fn labels(bounds: [f64; 2], count: usize, format: TickFormat) -> Vec<String> {
    let span = bounds[1] - bounds[0];
    (0..count)
        .map(|i| format.format(bounds[0] + span * i as f64 / (count - 1) as f64))
        .collect()
}

impl crate::ui::Panel for GraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let readout = Paragraph::new(self.readout())
            .block(Block::default().title("Readout").borders(Borders::ALL));
        f.render_widget(readout, chunks[0]);

        let view = &self.shared.view;
        let (frames, x_extent, y_extent) = self.snapshot();
        let ranges = view.ranges();
        let x_bounds = bounds(ranges.x.or(x_extent));
        let y_bounds = bounds(ranges.y.or(y_extent));

        // Keep leading line vectors alive until Chart::new() uses them
        let leading_points: Vec<Option<Vec<(f64, f64)>>> = frames
            .iter()
            .map(|frame| {
                frame
                    .leading
                    .as_ref()
                    .map(|line| vec![(line.pos, y_bounds[0]), (line.pos, y_bounds[1])])
            })
            .collect();

        let mut datasets: Vec<Dataset> = Vec::new();
        for (frame, leading) in frames.iter().zip(&leading_points) {
            let (marker, graph_type) = match frame.kind {
                PointKind::Line => (symbols::Marker::Braille, GraphType::Line),
                PointKind::Scatter => (symbols::Marker::Dot, GraphType::Scatter),
            };
            datasets.push(
                Dataset::default()
                    .name(frame.name.clone())
                    .marker(marker)
                    .graph_type(graph_type)
                    .style(Style::default().fg(frame.color))
                    .data(frame.points.as_slice()),
            );
            if let (Some(points), Some(line)) = (leading, frame.leading.as_ref()) {
                datasets.push(
                    Dataset::default()
                        .name(line.text.clone())
                        .marker(symbols::Marker::Dot)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(frame.color).add_modifier(Modifier::DIM))
                        .data(points.as_slice()),
                );
            }
        }

        let mut title = view.title().to_string();
        if view.is_paused() {
            title.push_str(" [paused]");
        }
        let chart = Chart::new(datasets)
            .block(Block::default().title(title).borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .bounds(x_bounds)
                    .labels(labels(x_bounds, 3, view.tick_format(PlotAxis::X))),
            )
            .y_axis(
                Axis::default()
                    .bounds(y_bounds)
                    .labels(labels(y_bounds, 5, view.tick_format(PlotAxis::Y))),
            );

        f.render_widget(chart, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_bounds_are_widened() {
        assert_eq!(bounds(Some(Range::new(2.0, 2.0))), [1.5, 2.5]);
        assert_eq!(bounds(None), [0.0, 1.0]);
    }

    #[test]
    fn labels_span_the_bounds() {
        assert_eq!(labels([0.0, 10.0], 3, TickFormat::Plain), vec!["0", "5", "10"]);
    }

    #[test]
    fn union_keeps_whichever_is_present() {
        let a = Some(Range::new(0.0, 1.0));
        assert_eq!(union(a, None), a);
        assert_eq!(union(None, a), a);
        assert_eq!(union(a, Some(Range::new(-1.0, 0.5))), Some(Range::new(-1.0, 1.0)));
    }
}
