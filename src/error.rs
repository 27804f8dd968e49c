//! src/error.rs
//!
//! Error type shared by the whole library.
//!
//! Only configuration errors and contract violations are errors. Dropped
//! updates (rate limited, paused, contended) are flow control and never
//! surface here.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LiveError {
    #[error("buffer capacity must be positive")]
    InvalidCapacity,
    #[error("{name} must be a positive rate in Hz, got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("roll_on_tick must be at least 1")]
    InvalidRollOnTick,
    #[error("length mismatch: {x_len} x values for {y_len} y values")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("bar height must be within [0, 1], got {0}")]
    InvalidBarHeight(f64),
    #[error("unsupported axis `{0}`")]
    UnsupportedAxis(String),
    #[error("unsupported orientation `{0}`")]
    UnsupportedOrientation(String),
}

pub type Result<T> = std::result::Result<T, LiveError>;
