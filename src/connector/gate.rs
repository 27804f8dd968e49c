//! src/connector/gate.rs
//!
//! Time-based admission control.
//!
//! Two independent intervals: the update interval decides whether a sample
//! is accepted at all, the plot interval decides whether an accepted sample
//! triggers a redraw. The first sample is always accepted and always plotted.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RateGate {
    update_interval: Duration,
    plot_interval: Duration,
    last_update: Option<Instant>,
    last_plot: Option<Instant>,
}

impl RateGate {
    /// Build a gate from rates in Hz. Infinite rates mean no throttling.
    pub fn new(update_rate: f64, plot_rate: f64) -> Self {
        Self {
            update_interval: interval_for(update_rate),
            plot_interval: interval_for(plot_rate),
            last_update: None,
            last_plot: None,
        }
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn plot_interval(&self) -> Duration {
        self.plot_interval
    }

    /// Whether an update arriving at `now` may be accepted.
    pub fn admits_update(&self, now: Instant) -> bool {
        elapsed_enough(self.last_update, now, self.update_interval)
    }

    /// Whether an accepted update at `now` should be redrawn.
    pub fn due_for_plot(&self, now: Instant) -> bool {
        elapsed_enough(self.last_plot, now, self.plot_interval)
    }

    pub fn mark_update(&mut self, now: Instant) {
        self.last_update = Some(now);
    }

    pub fn mark_plot(&mut self, now: Instant) {
        self.last_plot = Some(now);
    }
}

fn interval_for(rate: f64) -> Duration {
    if rate.is_infinite() {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(1.0 / rate).unwrap_or(Duration::MAX)
}

fn elapsed_enough(last: Option<Instant>, now: Instant, interval: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinite_rate_never_throttles() {
        let mut gate = RateGate::new(f64::INFINITY, f64::INFINITY);
        let now = Instant::now();
        gate.mark_update(now);
        gate.mark_plot(now);
        assert!(gate.admits_update(now));
        assert!(gate.due_for_plot(now));
    }

    #[test]
    fn update_interval_is_inverse_rate() {
        let mut gate = RateGate::new(10.0, 2.0);
        assert_eq!(gate.update_interval(), Duration::from_millis(100));
        assert_eq!(gate.plot_interval(), Duration::from_millis(500));

        let start = Instant::now();
        assert!(gate.admits_update(start));
        gate.mark_update(start);
        assert!(!gate.admits_update(start + Duration::from_millis(99)));
        assert!(gate.admits_update(start + Duration::from_millis(100)));
    }

    #[test]
    fn first_plot_is_always_due() {
        let gate = RateGate::new(1.0, 0.001);
        assert!(gate.due_for_plot(Instant::now()));
    }
}
