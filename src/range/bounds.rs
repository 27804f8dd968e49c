//! src/range/bounds.rs
//!
//! Axis identifiers, inclusive numeric ranges, and the `DataBounds` capability
//! every live series exposes to the range controller.

use std::fmt;
use std::str::FromStr;

use crate::error::LiveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl FromStr for Axis {
    type Err = LiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            _ => Err(LiveError::UnsupportedAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Inclusive `[low, high]` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const ZERO: Range = Range {
        low: 0.0,
        high: 0.0,
    };

    /// Create a range, swapping bounds if needed.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Min/max of the finite values, `None` if there are none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Range>, v| match acc {
                None => Some(Range { low: v, high: v }),
                Some(r) => Some(Range {
                    low: r.low.min(v),
                    high: r.high.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        (self.high - self.low).abs()
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &Range) -> Range {
        Range {
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    pub fn shifted(&self, by: f64) -> Range {
        Range {
            low: self.low + by,
            high: self.high + by,
        }
    }

    /// Widen a zero-width range by `padding` on each side.
    pub fn padded_if_degenerate(&self, padding: f64) -> Range {
        if self.is_degenerate() {
            Range {
                low: self.low - padding,
                high: self.high + padding,
            }
        } else {
            *self
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

impl From<(f64, f64)> for Range {
    fn from((a, b): (f64, f64)) -> Self {
        Range::new(a, b)
    }
}

/// Data extent queries used by the axis range controller.
pub trait DataBounds {
    /// Min/max on `axis` over the newest `tail` samples (`0` = all samples).
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range>;

    /// Offset of the series in view coordinates.
    fn position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    /// First and last sample on `axis` in data coordinates. Crop-to-data
    /// clamps against these; `None` leaves the window uncropped.
    fn first_last(&self, _axis: Axis) -> Option<(f64, f64)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_parses_case_insensitively() {
        assert_eq!("X".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(" y ".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!(
            "z".parse::<Axis>(),
            Err(LiveError::UnsupportedAxis("z".into()))
        );
    }

    #[test]
    fn from_values_skips_non_finite() {
        let r = Range::from_values([f64::NAN, 3.0, -1.0, f64::INFINITY]);
        assert_eq!(r, Some(Range::new(-1.0, 3.0)));
        assert_eq!(Range::from_values([f64::NAN]), None);
    }

    #[test]
    fn degenerate_padding() {
        let r = Range::new(0.0, 0.0).padded_if_degenerate(0.4);
        assert_eq!(r, Range::new(-0.4, 0.4));
        let r = Range::new(10.0, 10.0).padded_if_degenerate(0.4);
        assert!((r.span() - 0.8).abs() < 1e-9);
        assert_eq!(Range::new(1.0, 3.0).padded_if_degenerate(0.4), Range::new(1.0, 3.0));
    }
}
