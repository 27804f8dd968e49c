//! src/view/plot_view.rs
//!
//! One plot viewport shared by any number of series.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, RwLock};

use crate::connector::ConnectorId;
use crate::error::Result;
use crate::format::TickFormat;
use crate::range::{Axis, AxisRangeConfig, DEGENERATE_PADDING, DataBounds, LiveAxisRange, Range};

/// Currently displayed window per axis. `None` until some series has data
/// (or a fixed range is configured).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewRanges {
    pub x: Option<Range>,
    pub y: Option<Range>,
}

/// Viewport state written by bindings from producer threads and read by the
/// renderer.
///
/// Lock order is x controller, y controller, ranges.
#[derive(Debug)]
pub struct LivePlotView {
    title: String,
    x_controller: Mutex<LiveAxisRange>,
    y_controller: Mutex<LiveAxisRange>,
    ranges: RwLock<ViewRanges>,
    paused: AtomicBool,
    x_format: TickFormat,
    y_format: TickFormat,
}

impl LivePlotView {
    pub fn new(title: &str, x: AxisRangeConfig, y: AxisRangeConfig) -> Result<Self> {
        let x_controller = LiveAxisRange::new(x)?;
        let y_controller = LiveAxisRange::new(y)?;
        let ranges = ViewRanges {
            x: current(&x_controller, Axis::X),
            y: current(&y_controller, Axis::Y),
        };
        Ok(Self {
            title: title.to_string(),
            x_controller: Mutex::new(x_controller),
            y_controller: Mutex::new(y_controller),
            ranges: RwLock::new(ranges),
            paused: AtomicBool::new(false),
            x_format: TickFormat::Plain,
            y_format: TickFormat::Plain,
        })
    }

    pub fn with_tick_formats(mut self, x: TickFormat, y: TickFormat) -> Self {
        self.x_format = x;
        self.y_format = y;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Recompute `connector`'s contribution after tick `tick` and store the
    /// merged windows.
    pub fn roll(&self, connector: ConnectorId, source: &dyn DataBounds, tick: u64) -> ViewRanges {
        let mut x_ctrl = lock(&self.x_controller);
        let mut y_ctrl = lock(&self.y_controller);
        x_ctrl.x_range(connector, source, tick);
        y_ctrl.y_range(connector, source, tick);
        self.store(&x_ctrl, &y_ctrl)
    }

    /// Drop `connector` from both controllers.
    pub fn detach(&self, connector: ConnectorId) {
        let mut x_ctrl = lock(&self.x_controller);
        let mut y_ctrl = lock(&self.y_controller);
        x_ctrl.reset(connector);
        y_ctrl.reset(connector);
        self.store(&x_ctrl, &y_ctrl);
    }

    /// Exclude (or re-include) `connector` from the merged windows.
    pub fn set_ignored(&self, connector: ConnectorId, ignored: bool) {
        let mut x_ctrl = lock(&self.x_controller);
        let mut y_ctrl = lock(&self.y_controller);
        x_ctrl.set_ignored(connector, ignored);
        y_ctrl.set_ignored(connector, ignored);
        self.store(&x_ctrl, &y_ctrl);
    }

    /// Pin `axis` to `fixed`, or return it to automatic ranging with `None`.
    pub fn set_fixed_range(&self, axis: Axis, fixed: Option<Range>) {
        let mut x_ctrl = lock(&self.x_controller);
        let mut y_ctrl = lock(&self.y_controller);
        match axis {
            Axis::X => x_ctrl.set_fixed_range(fixed),
            Axis::Y => y_ctrl.set_fixed_range(fixed),
        }
        self.store(&x_ctrl, &y_ctrl);
    }

    pub fn is_fixed(&self, axis: Axis) -> bool {
        let ctrl = match axis {
            Axis::X => lock(&self.x_controller),
            Axis::Y => lock(&self.y_controller),
        };
        ctrl.config().fixed_range.is_some()
    }

    pub fn ranges(&self) -> ViewRanges {
        *self.ranges.read().unwrap_or_else(|p| p.into_inner())
    }

    pub fn x_range(&self) -> Option<Range> {
        self.ranges().x
    }

    pub fn y_range(&self) -> Option<Range> {
        self.ranges().y
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn tick_format(&self, axis: Axis) -> TickFormat {
        match axis {
            Axis::X => self.x_format,
            Axis::Y => self.y_format,
        }
    }

    /// Readouts for a pointer at `(x, y)` in data coordinates.
    pub fn crosshair(&self, x: f64, y: f64) -> (String, String) {
        (
            format!("X = {}", self.x_format.format(x)),
            format!("Y = {}", self.y_format.format(y)),
        )
    }

    fn store(&self, x_ctrl: &LiveAxisRange, y_ctrl: &LiveAxisRange) -> ViewRanges {
        let ranges = ViewRanges {
            x: current(x_ctrl, Axis::X),
            y: current(y_ctrl, Axis::Y),
        };
        *self.ranges.write().unwrap_or_else(|p| p.into_inner()) = ranges;
        ranges
    }
}

/// Displayable window of one controller: the fixed range, or the merge of
/// live contributions.
fn current(ctrl: &LiveAxisRange, axis: Axis) -> Option<Range> {
    ctrl.config()
        .fixed_range
        .map(|fixed| fixed.padded_if_degenerate(DEGENERATE_PADDING))
        .or_else(|| ctrl.merged(axis))
}

fn lock(ctrl: &Mutex<LiveAxisRange>) -> MutexGuard<'_, LiveAxisRange> {
    ctrl.lock().unwrap_or_else(|p| p.into_inner())
}
