//! src/range/axis_range.rs
//!
//! Rolling/fixed/auto view window computation shared by every series plotted
//! in one view.
//!
//! Each connector contributes one window per axis, computed from its series'
//! data. The final window is the union of all contributions whose connector
//! is not ignored. With `roll_on_tick > 1` the window is only recomputed every
//! `roll_on_tick` ticks so the view pages forward instead of jittering on each
//! sample.

use std::collections::{HashMap, HashSet};

use super::bounds::{Axis, DataBounds, Range};
use crate::connector::ConnectorId;
use crate::error::{LiveError, Result};

/// Half-width given to zero-width final ranges.
pub const DEGENERATE_PADDING: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct AxisRangeConfig {
    /// Recompute period in ticks; `1` follows every update.
    pub roll_on_tick: u64,

    /// Edge offsets as multiples of the window width.
    pub offset_left: f64,
    pub offset_right: f64,
    pub offset_top: f64,
    pub offset_bottom: f64,

    /// Overrides everything else when set.
    pub fixed_range: Option<Range>,

    /// Clamp the matching edge to the extent of the data.
    pub crop_left: bool,
    pub crop_right: bool,
    pub crop_top: bool,
    pub crop_bottom: bool,
}

impl AxisRangeConfig {
    pub fn rolling(roll_on_tick: u64) -> Self {
        Self {
            roll_on_tick,
            ..Self::default()
        }
    }

    pub fn fixed(low: f64, high: f64) -> Self {
        Self {
            fixed_range: Some(Range::new(low, high)),
            ..Self::default()
        }
    }

    pub fn with_offsets(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.offset_left = left;
        self.offset_right = right;
        self.offset_top = top;
        self.offset_bottom = bottom;
        self
    }

    pub fn with_crop(mut self, left: bool, right: bool, top: bool, bottom: bool) -> Self {
        self.crop_left = left;
        self.crop_right = right;
        self.crop_top = top;
        self.crop_bottom = bottom;
        self
    }

    /// (low offset, high offset, crop low, crop high) for `axis`.
    fn edges(&self, axis: Axis) -> (f64, f64, bool, bool) {
        match axis {
            Axis::X => (
                self.offset_left,
                self.offset_right,
                self.crop_left,
                self.crop_right,
            ),
            Axis::Y => (
                self.offset_bottom,
                self.offset_top,
                self.crop_bottom,
                self.crop_top,
            ),
        }
    }
}

impl Default for AxisRangeConfig {
    fn default() -> Self {
        Self {
            roll_on_tick: 1,
            offset_left: 0.0,
            offset_right: 0.0,
            offset_top: 0.0,
            offset_bottom: 0.0,
            fixed_range: None,
            crop_left: false,
            crop_right: false,
            crop_top: false,
            crop_bottom: false,
        }
    }
}

#[derive(Debug, Clone)]
struct AxisState {
    contributions: HashMap<ConnectorId, Range>,
    final_range: Range,
}

impl AxisState {
    fn new() -> Self {
        Self {
            contributions: HashMap::new(),
            final_range: Range::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiveAxisRange {
    config: AxisRangeConfig,
    x: AxisState,
    y: AxisState,
    ignored: HashSet<ConnectorId>,
}

impl LiveAxisRange {
    pub fn new(config: AxisRangeConfig) -> Result<Self> {
        if config.roll_on_tick == 0 {
            return Err(LiveError::InvalidRollOnTick);
        }
        Ok(Self {
            config,
            x: AxisState::new(),
            y: AxisState::new(),
            ignored: HashSet::new(),
        })
    }

    pub fn config(&self) -> &AxisRangeConfig {
        &self.config
    }

    /// Replace the fixed range; `None` returns to automatic ranging.
    pub fn set_fixed_range(&mut self, fixed: Option<Range>) {
        self.config.fixed_range = fixed;
    }

    /// Window on the x axis after `connector`'s tick `tick`.
    pub fn x_range(&mut self, connector: ConnectorId, source: &dyn DataBounds, tick: u64) -> Range {
        self.range(Axis::X, connector, source, tick)
    }

    /// Window on the y axis after `connector`'s tick `tick`.
    pub fn y_range(&mut self, connector: ConnectorId, source: &dyn DataBounds, tick: u64) -> Range {
        self.range(Axis::Y, connector, source, tick)
    }

    /// Recompute `connector`'s contribution on `axis` and return the merged
    /// window.
    pub fn range(
        &mut self,
        axis: Axis,
        connector: ConnectorId,
        source: &dyn DataBounds,
        tick: u64,
    ) -> Range {
        if let Some(fixed) = self.config.fixed_range {
            let fixed = fixed.padded_if_degenerate(DEGENERATE_PADDING);
            self.state_mut(axis).final_range = fixed;
            return fixed;
        }

        let tail = if self.config.roll_on_tick > 1 {
            self.config.roll_on_tick as usize
        } else {
            0
        };
        let Some(observed) = source.data_bounds(axis, tail) else {
            return self.final_range(axis);
        };
        let (low_offset, high_offset, crop_low, crop_high) = self.config.edges(axis);
        let Some(window) = self.window(observed, tick, low_offset, high_offset) else {
            return self.final_range(axis);
        };

        let position = match axis {
            Axis::X => source.position().0,
            Axis::Y => source.position().1,
        };
        let mut window = window.shifted(position);
        if crop_low || crop_high {
            if let Some((first, last)) = source.first_last(axis) {
                if crop_low && window.low < first {
                    window.low = first;
                }
                if crop_high && window.high > last {
                    window.high = last;
                }
            }
        }

        self.state_mut(axis).contributions.insert(connector, window);
        self.remerge(axis)
    }

    /// Current final window on `axis`.
    pub fn final_range(&self, axis: Axis) -> Range {
        self.state(axis).final_range
    }

    /// Stored contribution of `connector` on `axis`, ignored or not.
    pub fn contribution(&self, axis: Axis, connector: ConnectorId) -> Option<Range> {
        self.state(axis).contributions.get(&connector).copied()
    }

    /// Union of the non-ignored contributions, padded when zero-width.
    pub fn merged(&self, axis: Axis) -> Option<Range> {
        self.state(axis)
            .contributions
            .iter()
            .filter(|(id, _)| !self.ignored.contains(id))
            .map(|(_, r)| *r)
            .reduce(|acc, r| acc.union(&r))
            .map(|r| r.padded_if_degenerate(DEGENERATE_PADDING))
    }

    /// Exclude or re-include `connector` in the merge. Stored contributions
    /// are kept either way.
    pub fn set_ignored(&mut self, connector: ConnectorId, ignored: bool) {
        let changed = if ignored {
            self.ignored.insert(connector)
        } else {
            self.ignored.remove(&connector)
        };
        if changed && self.config.fixed_range.is_none() {
            self.remerge(Axis::X);
            self.remerge(Axis::Y);
        }
    }

    pub fn is_ignored(&self, connector: ConnectorId) -> bool {
        self.ignored.contains(&connector)
    }

    /// Forget `connector`'s contributions, e.g. after its data was cleared.
    pub fn reset(&mut self, connector: ConnectorId) {
        for axis in [Axis::X, Axis::Y] {
            let merged = {
                let state = self.state_mut(axis);
                state.contributions.remove(&connector);
                state.final_range = Range::ZERO;
                self.merged(axis)
            };
            if let Some(merged) = merged {
                self.state_mut(axis).final_range = merged;
            }
        }
    }

    /// Raw window for one connector, `None` between recompute ticks.
    fn window(&self, observed: Range, tick: u64, low_offset: f64, high_offset: f64) -> Option<Range> {
        let roll = self.config.roll_on_tick;
        if roll == 1 {
            if low_offset == 0.0 && high_offset == 0.0 {
                return Some(observed);
            }
            let per_tick = if tick == 0 {
                0.0
            } else {
                observed.span() / tick as f64
            };
            return Some(Range {
                low: observed.low - per_tick * low_offset,
                high: observed.high + per_tick * high_offset,
            });
        }
        if tick < 2 {
            // not enough history yet: reach forward to the first roll
            let width = observed.span() * (roll - (tick + 1)) as f64;
            return Some(Range {
                low: observed.high,
                high: observed.high + width,
            });
        }
        if tick % roll != 0 {
            return None;
        }
        let width = observed.span();
        Some(Range {
            low: observed.high - width * low_offset,
            high: observed.high + width * (1.0 + high_offset),
        })
    }

    /// Final becomes the merge of non-ignored contributions, or
    /// `Range::ZERO` when none is left.
    fn remerge(&mut self, axis: Axis) -> Range {
        let merged = self.merged(axis).unwrap_or(Range::ZERO);
        let state = self.state_mut(axis);
        if state.final_range != merged {
            state.final_range = merged;
        }
        merged
    }

    fn state(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn state_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

impl Default for LiveAxisRange {
    fn default() -> Self {
        Self {
            config: AxisRangeConfig::default(),
            x: AxisState::new(),
            y: AxisState::new(),
            ignored: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{Capacity, SeriesBuffer};

    fn ids() -> (ConnectorId, ConnectorId) {
        use crate::connector::{ConnectorConfig, DataConnector};
        let a = DataConnector::<f64>::new(ConnectorConfig::default()).unwrap();
        let b = DataConnector::<f64>::new(ConnectorConfig::default()).unwrap();
        (a.id(), b.id())
    }

    fn series(points: &[(f64, f64)]) -> SeriesBuffer<f64> {
        let mut buf = SeriesBuffer::new(Capacity::Unbounded);
        buf.extend(points.iter().copied());
        buf
    }

    fn ramp(n: usize) -> SeriesBuffer<f64> {
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();
        series(&points)
    }

    #[test]
    fn zero_roll_on_tick_is_rejected() {
        let err = LiveAxisRange::new(AxisRangeConfig::rolling(0)).unwrap_err();
        assert_eq!(err, LiveError::InvalidRollOnTick);
    }

    #[test]
    fn roll_on_every_tick_follows_full_range() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::default();
        assert_eq!(range.x_range(a, &series(&[(0.0, 1.0), (10.0, 2.0)]), 1), Range::new(0.0, 10.0));
        assert_eq!(range.x_range(a, &series(&[(0.0, 1.0), (20.0, 2.0)]), 2), Range::new(0.0, 20.0));
    }

    #[test]
    fn roll_on_every_tick_with_offsets_extrapolates_per_tick() {
        let (a, _) = ids();
        let config = AxisRangeConfig::default().with_offsets(2.0, 1.0, 0.0, 0.0);
        let mut range = LiveAxisRange::new(config).unwrap();
        // 11 points over [0, 10]: one unit per tick
        assert_eq!(range.x_range(a, &ramp(11), 10), Range::new(-2.0, 11.0));
    }

    #[test]
    fn fixed_range_wins() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::new(AxisRangeConfig::fixed(-1.0, 1.0)).unwrap();
        assert_eq!(range.y_range(a, &series(&[(0.0, 50.0)]), 7), Range::new(-1.0, 1.0));
        assert_eq!(range.final_range(Axis::Y), Range::new(-1.0, 1.0));
    }

    #[test]
    fn bootstrap_ticks_reach_forward() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::new(AxisRangeConfig::rolling(10)).unwrap();
        let first = range.x_range(a, &ramp(1), 0);
        assert_eq!(first, Range::new(-0.4, 0.4));
        // two points one unit apart: reach to tick 9
        assert_eq!(range.x_range(a, &ramp(2), 1), Range::new(1.0, 9.0));
    }

    #[test]
    fn rolling_window_holds_between_roll_ticks() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::new(AxisRangeConfig::rolling(5)).unwrap();
        range.x_range(a, &ramp(2), 1);
        let at_five = range.x_range(a, &ramp(6), 5);
        // tail of 5 points spans [1, 5]: page forward by its width
        assert_eq!(at_five, Range::new(5.0, 9.0));
        for tick in 6..10 {
            assert_eq!(range.x_range(a, &ramp(tick as usize + 1), tick), at_five);
        }
        assert_eq!(range.x_range(a, &ramp(11), 10), Range::new(10.0, 14.0));
    }

    #[test]
    fn left_offset_shows_history() {
        let (a, _) = ids();
        let config = AxisRangeConfig::rolling(5).with_offsets(1.0, 0.0, 0.0, 0.0);
        let mut range = LiveAxisRange::new(config).unwrap();
        assert_eq!(range.x_range(a, &ramp(11), 10), Range::new(6.0, 14.0));
    }

    #[test]
    fn crop_clamps_to_data_extent() {
        let (a, _) = ids();
        let config = AxisRangeConfig::rolling(5)
            .with_offsets(10.0, 0.0, 0.0, 0.0)
            .with_crop(true, true, false, false);
        let mut range = LiveAxisRange::new(config).unwrap();
        assert_eq!(range.x_range(a, &ramp(11), 10), Range::new(0.0, 10.0));
    }

    #[test]
    fn crop_clamps_y_to_first_and_last_values() {
        let (a, b) = ids();
        // a spike inside the buffer but outside the rolling tail
        let ys = [0.9, 0.2, 0.4, 100.0, 0.6, 0.7, 0.8, 0.9, 1.0];
        let points: Vec<(f64, f64)> = ys.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
        let data = series(&points);

        let config = AxisRangeConfig::rolling(5).with_offsets(0.0, 0.0, 1.0, 1.0);
        let mut uncropped = LiveAxisRange::new(config.clone()).unwrap();
        let open = uncropped.y_range(a, &data, 5);
        assert!(open.low < 0.9);
        assert!(open.high > 1.0);

        let mut cropped = LiveAxisRange::new(config.with_crop(false, false, true, true)).unwrap();
        cropped.y_range(b, &data, 5);
        let window = cropped.contribution(Axis::Y, b).unwrap();
        assert_eq!(window.low, 0.9);
        assert_eq!(window.high, 1.0);
    }

    #[test]
    fn crop_ignores_position_shift() {
        struct Shifted(SeriesBuffer<f64>);
        impl DataBounds for Shifted {
            fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
                self.0.data_bounds(axis, tail)
            }
            fn position(&self) -> (f64, f64) {
                (2.0, 0.0)
            }
            fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
                self.0.first_last(axis)
            }
        }
        let (a, _) = ids();
        let config = AxisRangeConfig::default().with_crop(false, true, false, false);
        let mut range = LiveAxisRange::new(config).unwrap();
        // shifted window [2, 12] is clamped to the raw last x
        let r = range.x_range(a, &Shifted(ramp(11)), 10);
        assert_eq!(r, Range::new(2.0, 10.0));
    }

    #[test]
    fn all_ignored_leaves_zero_final_range() {
        let (a, b) = ids();
        let mut range = LiveAxisRange::default();
        range.x_range(a, &series(&[(0.0, 0.0), (10.0, 0.0)]), 1);
        range.x_range(b, &series(&[(5.0, 0.0), (20.0, 0.0)]), 1);

        range.set_ignored(a, true);
        range.set_ignored(b, true);
        assert_eq!(range.merged(Axis::X), None);
        assert_eq!(range.final_range(Axis::X), Range::ZERO);

        range.set_ignored(a, false);
        assert_eq!(range.final_range(Axis::X), Range::new(0.0, 10.0));
    }

    #[test]
    fn two_connectors_merge_to_union() {
        let (a, b) = ids();
        let mut range = LiveAxisRange::default();
        range.x_range(a, &series(&[(0.0, 0.0), (10.0, 0.0)]), 1);
        let merged = range.x_range(b, &series(&[(5.0, 0.0), (20.0, 0.0)]), 1);
        assert_eq!(merged, Range::new(0.0, 20.0));
    }

    #[test]
    fn merge_is_idempotent() {
        let (a, b) = ids();
        let mut range = LiveAxisRange::default();
        range.y_range(a, &series(&[(0.0, -3.0), (1.0, 2.0)]), 1);
        range.y_range(b, &series(&[(0.0, 1.0), (1.0, 8.0)]), 1);
        assert_eq!(range.merged(Axis::Y), range.merged(Axis::Y));
        assert_eq!(range.merged(Axis::Y), Some(Range::new(-3.0, 8.0)));
    }

    #[test]
    fn ignore_and_reinclude() {
        let (a, b) = ids();
        let mut range = LiveAxisRange::default();
        range.x_range(a, &series(&[(0.0, 0.0), (10.0, 0.0)]), 1);
        range.x_range(b, &series(&[(5.0, 0.0), (20.0, 0.0)]), 1);

        range.set_ignored(b, true);
        assert_eq!(range.final_range(Axis::X), Range::new(0.0, 10.0));
        assert_eq!(range.contribution(Axis::X, b), Some(Range::new(5.0, 20.0)));

        range.set_ignored(b, false);
        assert_eq!(range.final_range(Axis::X), Range::new(0.0, 20.0));
    }

    #[test]
    fn single_point_is_padded() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::default();
        let r = range.y_range(a, &series(&[(3.0, 7.0)]), 0);
        assert!((r.span() - 0.8).abs() < 1e-9);
        assert!(r.contains(7.0));
    }

    #[test]
    fn reset_drops_contribution() {
        let (a, b) = ids();
        let mut range = LiveAxisRange::default();
        range.x_range(a, &series(&[(0.0, 0.0), (10.0, 0.0)]), 1);
        range.x_range(b, &series(&[(5.0, 0.0), (20.0, 0.0)]), 1);
        range.reset(b);
        assert_eq!(range.contribution(Axis::X, b), None);
        assert_eq!(range.final_range(Axis::X), Range::new(0.0, 10.0));
        range.reset(a);
        assert_eq!(range.final_range(Axis::X), Range::ZERO);
    }

    #[test]
    fn position_shifts_window() {
        struct Shifted(SeriesBuffer<f64>);
        impl DataBounds for Shifted {
            fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
                self.0.data_bounds(axis, tail)
            }
            fn position(&self) -> (f64, f64) {
                (100.0, 0.0)
            }
        }
        let (a, _) = ids();
        let mut range = LiveAxisRange::default();
        let r = range.x_range(a, &Shifted(series(&[(0.0, 0.0), (1.0, 0.0)])), 1);
        assert_eq!(r, Range::new(100.0, 101.0));
    }

    #[test]
    fn empty_series_keeps_previous_window() {
        let (a, _) = ids();
        let mut range = LiveAxisRange::default();
        range.x_range(a, &series(&[(0.0, 0.0), (4.0, 0.0)]), 1);
        assert_eq!(range.x_range(a, &series(&[]), 2), Range::new(0.0, 4.0));
    }
}
