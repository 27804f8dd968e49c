//! src/ui.rs
//!
//! Layout tree and the `Panel` trait every dashboard surface implements.

pub mod node;

/// Re-exports
pub use node::{Node, Panel, group, panel};
