//! src/lib.rs
//!
//! Real-time plotting core: thread-safe data connectors, rate gating,
//! rolling axis ranges and the data-side models of live series.
//!
//! The pipeline reads left to right:
//!
//! ```text
//! producer thread -> DataConnector -> ConnectorEvent -> SeriesBinding
//!                                                        |-> LiveSeries::set_data
//!                                                        '-> LiveAxisRange -> LivePlotView
//! ```
//!
//! Rendering is left to the host; the `livechart` binary is a terminal
//! consumer built on ratatui.

pub mod connector;
pub mod error;
pub mod format;
pub mod producer;
pub mod range;
pub mod series;
pub mod view;

/// Re-exports
pub use connector::{
    Capacity, Clock, ConnectorConfig, ConnectorEvent, ConnectorId, DataConnector, ManualClock,
    SeriesBuffer, StyleOptions, Subscriber, SystemClock,
};
pub use error::{LiveError, Result};
pub use format::{TickFormat, scaled_duration};
pub use range::{Axis, AxisRangeConfig, DataBounds, LiveAxisRange, Range};
pub use series::{
    BarSeries, Candle, CandlestickSeries, CategorizedBarSeries, HeatMapSeries, LeadingLineState,
    LiveSeries, PointSeries, SeriesAdapter,
};
pub use view::{LivePlotView, SeriesBinding, ViewRanges};
