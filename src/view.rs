//! src/view.rs
//!
//! Plot-side state fed by connectors: the shared view window and the
//! bindings that route connector events into series and range controllers.

pub mod binding;
pub mod plot_view;

/// Re-exports
pub use crate::format::TickFormat;
pub use binding::SeriesBinding;
pub use plot_view::{LivePlotView, ViewRanges};
