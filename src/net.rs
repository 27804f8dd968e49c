//! src/net.rs
//!
//! Remote control surface of the terminal app.

pub mod remote;

/// Re-exports
pub use remote::remote_server;
