//! src/series/point.rs
//!
//! Line and scatter series over `f64` samples.

use crate::connector::StyleOptions;
use crate::error::Result;
use crate::range::{Axis, DataBounds, Range};

use super::leading::LeadingLineState;
use super::{LiveSeries, check_lengths, first_last, tail_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointKind {
    #[default]
    Line,
    Scatter,
}

#[derive(Debug, Clone, Default)]
pub struct PointSeries {
    kind: PointKind,
    x: Vec<f64>,
    y: Vec<f64>,
    style: StyleOptions,
    position: (f64, f64),
    leading: Option<LeadingLineState>,
}

impl PointSeries {
    pub fn line() -> Self {
        Self::default()
    }

    pub fn scatter() -> Self {
        Self {
            kind: PointKind::Scatter,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_leading_line(mut self, leading: LeadingLineState) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn kind(&self) -> PointKind {
        self.kind
    }

    /// Style of the latest update.
    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Samples as `(x, y)` pairs, the shape chart widgets expect.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.x.iter().copied().zip(self.y.iter().copied()).collect()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.x.last()?, *self.y.last()?))
    }
}

impl DataBounds for PointSeries {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        match axis {
            Axis::X => tail_bounds(&self.x, tail),
            Axis::Y => tail_bounds(&self.y, tail),
        }
    }

    fn position(&self) -> (f64, f64) {
        self.position
    }

    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => first_last(&self.x),
            Axis::Y => first_last(&self.y),
        }
    }
}

impl LiveSeries for PointSeries {
    type Value = f64;

    fn set_data(&mut self, x: &[f64], y: &[f64], style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        self.x.clear();
        self.x.extend_from_slice(x);
        self.y.clear();
        self.y.extend_from_slice(y);
        if !style.is_empty() {
            self.style = style.clone();
        }
        let last = self.last();
        if let (Some(leading), Some((lx, ly))) = (self.leading.as_mut(), last) {
            leading.update(lx, ly, None, None);
        }
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.x
    }

    fn values(&self) -> &[f64] {
        &self.y
    }

    fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
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
    use crate::error::LiveError;

    #[test]
    fn set_data_replaces_and_bounds_follow() {
        let mut s = PointSeries::line();
        s.set_data(&[0.0, 1.0, 2.0], &[5.0, -1.0, 3.0], &StyleOptions::new())
            .unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.data_bounds(Axis::Y, 0), Some(Range::new(-1.0, 5.0)));
        assert_eq!(s.data_bounds(Axis::Y, 2), Some(Range::new(-1.0, 3.0)));
        assert_eq!(s.data_bounds(Axis::X, 1), Some(Range::new(2.0, 2.0)));

        s.set_data(&[7.0], &[8.0], &StyleOptions::new()).unwrap();
        assert_eq!(s.points(), vec![(7.0, 8.0)]);
    }

    #[test]
    fn mismatched_lengths_leave_data_untouched() {
        let mut s = PointSeries::scatter();
        s.set_data(&[1.0], &[1.0], &StyleOptions::new()).unwrap();
        let err = s.set_data(&[1.0, 2.0], &[1.0], &StyleOptions::new());
        assert_eq!(err, Err(LiveError::LengthMismatch { x_len: 2, y_len: 1 }));
        assert_eq!(s.points(), vec![(1.0, 1.0)]);
    }

    #[test]
    fn style_is_kept_until_overridden() {
        let mut s = PointSeries::line();
        let red = StyleOptions::new().with(StyleOptions::COLOR, "red");
        s.set_data(&[0.0], &[0.0], &red).unwrap();
        s.set_data(&[1.0], &[1.0], &StyleOptions::new()).unwrap();
        assert_eq!(s.style().get(StyleOptions::COLOR), Some("red"));
    }

    #[test]
    fn leading_line_tracks_last_point() {
        let mut leading = LeadingLineState::new();
        leading.set_leading_line_str("vertical", "y").unwrap();
        let mut s = PointSeries::line().with_leading_line(leading);
        s.set_data(&[1.0, 2.0], &[10.0, 20.0], &StyleOptions::new())
            .unwrap();

        let line = s.leading_line().unwrap().vertical().unwrap();
        assert_eq!(line.pos, 2.0);
        assert_eq!(line.text, "20");

        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.leading_line().unwrap().vertical().unwrap().pos, 0.0);
    }
}
