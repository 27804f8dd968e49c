//! src/producer.rs
//!
//! Data sources that feed connectors from their own threads: synthetic
//! generators and a serial line reader. All of them stop cooperatively
//! through a shared [`CancellationToken`].

pub mod cancel;
pub mod generators;
pub mod serial;

/// Re-exports
pub use cancel::CancellationToken;
pub use generators::{
    candle_sample, cosine_sample, sine_sample, spawn_candles, spawn_categories, spawn_cosine_wave,
    spawn_periodic, spawn_random_walk, spawn_sine_array, spawn_sine_wave,
};
pub use serial::{SerialChannel, SerialSource, parse_numbers, spawn_serial_reader};
