//! src/connector/config.rs
//!
//! Construction-time options for a data connector.
//!
//! Rates are given in Hz and turned into minimum intervals by the rate gate;
//! an infinite rate disables throttling.

use std::num::NonZeroUsize;

use crate::error::{LiveError, Result};

/// Buffer capacity: a positive number of points, or no limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capacity {
    Bounded(NonZeroUsize),
    Unbounded,
}

impl Capacity {
    /// Bounded capacity; zero is rejected.
    pub fn bounded(max_points: usize) -> Result<Self> {
        NonZeroUsize::new(max_points)
            .map(Capacity::Bounded)
            .ok_or(LiveError::InvalidCapacity)
    }

    /// Maximum number of points, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Capacity::Bounded(n) => Some(n.get()),
            Capacity::Unbounded => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConnectorConfig {
    /// Maximum number of buffered points (oldest evicted first).
    pub max_points: Capacity,

    /// Maximum accepted updates per second.
    pub update_rate: f64,

    /// Maximum redraw notifications per second.
    pub plot_rate: f64,

    /// Skip axis range computation for this connector's roll ticks.
    pub ignore_auto_range: bool,
}

impl ConnectorConfig {
    /// Create a new `ConnectorConfig`.
    ///
    /// `max_points` of `None` means unbounded; `Some(0)` is rejected.
    pub fn new(
        max_points: Option<usize>,
        update_rate: f64,
        plot_rate: f64,
        ignore_auto_range: bool,
    ) -> Result<Self> {
        let max_points = match max_points {
            Some(n) => Capacity::bounded(n)?,
            None => Capacity::Unbounded,
        };
        let cfg = Self {
            max_points,
            update_rate,
            plot_rate,
            ignore_auto_range,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Bounded buffer with no rate limits.
    pub fn bounded(max_points: usize) -> Result<Self> {
        Self::new(Some(max_points), f64::INFINITY, f64::INFINITY, false)
    }

    pub fn with_update_rate(mut self, hz: f64) -> Self {
        self.update_rate = hz;
        self
    }

    pub fn with_plot_rate(mut self, hz: f64) -> Self {
        self.plot_rate = hz;
        self
    }

    pub fn with_ignore_auto_range(mut self, ignore: bool) -> Self {
        self.ignore_auto_range = ignore;
        self
    }

    /// Check rates; capacity is already guaranteed positive by `Capacity`.
    pub fn validate(&self) -> Result<()> {
        check_rate("update_rate", self.update_rate)?;
        check_rate("plot_rate", self.plot_rate)
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            max_points: Capacity::Unbounded,
            update_rate: f64::INFINITY,
            plot_rate: f64::INFINITY,
            ignore_auto_range: false,
        }
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(LiveError::InvalidRate { name, value });
    }
    Ok(())
}
