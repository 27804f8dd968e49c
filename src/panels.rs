//! src/panels.rs
//!
//! Dashboard panels. Each one reads a `SharedPlot` (or the log buffer) and
//! never mutates plot state.

pub mod graph;
pub mod history;
pub mod info;
pub mod log;
pub mod paragraph;
pub mod title;

/// Re-exports
pub use graph::GraphPanel;
pub use history::HistoryPanel;
pub use info::InfoPanel;
pub use log::LogPanel;
pub use paragraph::ParagraphPanel;
pub use title::TitlePanel;
