//! src/connector.rs
//!
//! Top-level `connector` module: buffering, rate gating and event delivery
//! between producers and views.

pub mod buffer;
pub mod clock;
pub mod config;
pub mod data_connector;
pub mod event;
pub mod gate;

/// Re-exports
pub use buffer::SeriesBuffer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Capacity, ConnectorConfig};
pub use data_connector::{ConnectorId, DataConnector};
pub use event::{ConnectorEvent, StyleOptions, Subscriber};
pub use gate::RateGate;
