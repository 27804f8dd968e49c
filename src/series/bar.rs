//! src/series/bar.rs
//!
//! Vertical and horizontal bar series. Bars of a horizontal series grow
//! along x, so the roles of the two axes swap for bounds and leading lines.

use crate::connector::StyleOptions;
use crate::error::Result;
use crate::range::{Axis, DataBounds, Range};

use super::leading::{LeadingLineState, Orientation};
use super::{LiveSeries, check_lengths, first_last, tail_bounds};

/// Bar rectangle in data coordinates, anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct BarSeries {
    orientation: Orientation,
    /// Where bars start on the value axis.
    base: f64,
    /// Bar extent across the position axis.
    thickness: f64,
    positions: Vec<f64>,
    values: Vec<f64>,
    style: StyleOptions,
    leading: Option<LeadingLineState>,
}

impl BarSeries {
    /// Bars standing on `y0`, `width` wide.
    pub fn vertical(y0: f64, width: f64) -> Self {
        Self::new(Orientation::Vertical, y0, width)
    }

    /// Bars starting at `x0`, `height` tall.
    pub fn horizontal(x0: f64, height: f64) -> Self {
        Self::new(Orientation::Horizontal, x0, height)
    }

    fn new(orientation: Orientation, base: f64, thickness: f64) -> Self {
        Self {
            orientation,
            base,
            thickness,
            positions: Vec::new(),
            values: Vec::new(),
            style: StyleOptions::new(),
            leading: None,
        }
    }

    pub fn with_leading_line(mut self, leading: LeadingLineState) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    pub fn rects(&self) -> Vec<BarRect> {
        let half = self.thickness / 2.0;
        self.positions
            .iter()
            .zip(&self.values)
            .map(|(&pos, &value)| {
                let (low, high) = if value >= self.base {
                    (self.base, value)
                } else {
                    (value, self.base)
                };
                match self.orientation {
                    Orientation::Vertical => BarRect {
                        x: pos - half,
                        y: low,
                        width: self.thickness,
                        height: high - low,
                    },
                    Orientation::Horizontal => BarRect {
                        x: low,
                        y: pos - half,
                        width: high - low,
                        height: self.thickness,
                    },
                }
            })
            .collect()
    }

    fn plot_coords(&self, position: f64, value: f64) -> (f64, f64) {
        match self.orientation {
            Orientation::Vertical => (position, value),
            Orientation::Horizontal => (value, position),
        }
    }

    /// Whether `axis` runs along bar positions rather than bar values.
    fn along_position(&self, axis: Axis) -> bool {
        matches!(
            (self.orientation, axis),
            (Orientation::Vertical, Axis::X) | (Orientation::Horizontal, Axis::Y)
        )
    }
}

impl DataBounds for BarSeries {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        if self.along_position(axis) {
            tail_bounds(&self.positions, tail)
        } else {
            tail_bounds(&self.values, tail)
        }
    }

    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        if self.along_position(axis) {
            first_last(&self.positions)
        } else {
            first_last(&self.values)
        }
    }
}

impl LiveSeries for BarSeries {
    type Value = f64;

    fn set_data(&mut self, x: &[f64], y: &[f64], style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        self.positions = x.to_vec();
        self.values = y.to_vec();
        if !style.is_empty() {
            self.style = style.clone();
        }
        if let (Some(&pos), Some(&value)) = (self.positions.last(), self.values.last()) {
            let (lx, ly) = self.plot_coords(pos, value);
            if let Some(leading) = self.leading.as_mut() {
                leading.update(lx, ly, None, None);
            }
        }
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.positions
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.values.clear();
        if let Some(leading) = self.leading.as_mut() {
            leading.clear();
        }
    }

    fn leading_line(&self) -> Option<&LeadingLineState> {
        self.leading.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_bars_bound_like_points() {
        let mut bars = BarSeries::vertical(0.0, 0.5);
        bars.set_data(&[1.0, 2.0, 3.0], &[4.0, -2.0, 6.0], &StyleOptions::new())
            .unwrap();
        assert_eq!(bars.data_bounds(Axis::X, 0), Some(Range::new(1.0, 3.0)));
        assert_eq!(bars.data_bounds(Axis::Y, 0), Some(Range::new(-2.0, 6.0)));
    }

    #[test]
    fn horizontal_bars_swap_axes() {
        let mut bars = BarSeries::horizontal(0.0, 1.0);
        bars.set_data(&[1.0, 2.0], &[10.0, 30.0], &StyleOptions::new())
            .unwrap();
        assert_eq!(bars.data_bounds(Axis::X, 0), Some(Range::new(10.0, 30.0)));
        assert_eq!(bars.data_bounds(Axis::Y, 0), Some(Range::new(1.0, 2.0)));

        let rects = bars.rects();
        assert_eq!(
            rects[1],
            BarRect {
                x: 0.0,
                y: 1.5,
                width: 30.0,
                height: 1.0
            }
        );
    }

    #[test]
    fn negative_values_hang_below_base() {
        let mut bars = BarSeries::vertical(1.0, 2.0);
        bars.set_data(&[0.0], &[-3.0], &StyleOptions::new()).unwrap();
        assert_eq!(
            bars.rects(),
            vec![BarRect {
                x: -1.0,
                y: -3.0,
                width: 2.0,
                height: 4.0
            }]
        );
    }

    #[test]
    fn horizontal_leading_line_follows_value() {
        let mut leading = LeadingLineState::new();
        leading.set_leading_line_str("vertical", "x").unwrap();
        let mut bars = BarSeries::horizontal(0.0, 1.0).with_leading_line(leading);
        bars.set_data(&[5.0], &[42.0], &StyleOptions::new()).unwrap();
        let line = bars.leading_line().unwrap().vertical().unwrap();
        assert_eq!(line.pos, 42.0);
        assert_eq!(line.text, "42");
    }
}
