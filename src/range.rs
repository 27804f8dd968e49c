//! src/range.rs
//!
//! Top-level `range` module: axis identifiers, numeric ranges and the
//! rolling axis range controller.

pub mod axis_range;
pub mod bounds;

/// Re-exports
pub use axis_range::{AxisRangeConfig, DEGENERATE_PADDING, LiveAxisRange};
pub use bounds::{Axis, DataBounds, Range};
