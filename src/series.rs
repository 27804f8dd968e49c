//! src/series.rs
//!
//! Data-side models of every live plot type.
//!
//! Each series implements [`LiveSeries`] directly: the binding pushes
//! connector snapshots in through `set_data`, and the axis range controller
//! reads extents back through [`DataBounds`]. Painting is left to the host.

pub mod adapter;
pub mod bar;
pub mod candle;
pub mod categorized;
pub mod heatmap;
pub mod leading;
pub mod point;

/// Re-exports
pub use adapter::SeriesAdapter;
pub use bar::{BarRect, BarSeries};
pub use candle::{Candle, CandlestickSeries};
pub use categorized::{CategorizedBarSeries, CategorySpan};
pub use heatmap::HeatMapSeries;
pub use leading::{LeadingLine, LeadingLineState, Orientation, TextOrientation};
pub use point::{PointKind, PointSeries};

use crate::connector::StyleOptions;
use crate::error::{LiveError, Result};
use crate::range::{DataBounds, Range};

/// Capability shared by all plot types that can be fed by a connector.
pub trait LiveSeries: DataBounds + Send {
    /// Element type of the connector's y buffer.
    type Value: Clone + Send + Sync + 'static;

    /// Replace the displayed data with a connector snapshot.
    fn set_data(&mut self, x: &[f64], y: &[Self::Value], style: &StyleOptions) -> Result<()>;

    fn x_data(&self) -> &[f64];

    fn values(&self) -> &[Self::Value];

    fn len(&self) -> usize {
        self.x_data().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn leading_line(&self) -> Option<&LeadingLineState> {
        None
    }
}

/// Newest `tail` items (`0` = all).
pub(crate) fn tail_of<T>(values: &[T], tail: usize) -> &[T] {
    if tail == 0 || tail >= values.len() {
        values
    } else {
        &values[values.len() - tail..]
    }
}

pub(crate) fn tail_bounds(values: &[f64], tail: usize) -> Option<Range> {
    Range::from_values(tail_of(values, tail).iter().copied())
}

pub(crate) fn first_last(values: &[f64]) -> Option<(f64, f64)> {
    Some((*values.first()?, *values.last()?))
}

pub(crate) fn check_lengths(x_len: usize, y_len: usize) -> Result<()> {
    if x_len != y_len {
        return Err(LiveError::LengthMismatch { x_len, y_len });
    }
    Ok(())
}
