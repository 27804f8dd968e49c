//! src/series/adapter.rs
//!
//! Wraps a foreign plot object so it can be fed by a connector. The adapter
//! keeps its own copy of the data for bounds and hands every update to a
//! callback that pushes it into the wrapped object.

use std::fmt;

use crate::connector::StyleOptions;
use crate::error::Result;
use crate::range::{Axis, DataBounds, Range};

use super::{LiveSeries, check_lengths, first_last, tail_bounds};

type ApplyFn<T> = Box<dyn FnMut(&mut T, &[f64], &[f64], &StyleOptions) + Send>;

pub struct SeriesAdapter<T> {
    inner: T,
    apply: ApplyFn<T>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl<T: Send> SeriesAdapter<T> {
    pub fn new<F>(inner: T, apply: F) -> Self
    where
        F: FnMut(&mut T, &[f64], &[f64], &StyleOptions) + Send + 'static,
    {
        Self {
            inner,
            apply: Box::new(apply),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> fmt::Debug for SeriesAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesAdapter")
            .field("len", &self.x.len())
            .finish_non_exhaustive()
    }
}

impl<T> DataBounds for SeriesAdapter<T> {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        match axis {
            Axis::X => tail_bounds(&self.x, tail),
            Axis::Y => tail_bounds(&self.y, tail),
        }
    }

    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => first_last(&self.x),
            Axis::Y => first_last(&self.y),
        }
    }
}

impl<T: Send> LiveSeries for SeriesAdapter<T> {
    type Value = f64;

    fn set_data(&mut self, x: &[f64], y: &[f64], style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        self.x = x.to_vec();
        self.y = y.to_vec();
        (self.apply)(&mut self.inner, x, y, style);
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.x
    }

    fn values(&self) -> &[f64] {
        &self.y
    }

    fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        (self.apply)(&mut self.inner, &[], &[], &StyleOptions::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sparkline {
        cells: Vec<u64>,
        updates: usize,
    }

    fn adapter() -> SeriesAdapter<Sparkline> {
        SeriesAdapter::new(Sparkline::default(), |spark: &mut Sparkline, _x, y, _style| {
            spark.cells = y.iter().map(|v| v.max(0.0) as u64).collect();
            spark.updates += 1;
        })
    }

    #[test]
    fn updates_reach_the_wrapped_object() {
        let mut series = adapter();
        series
            .set_data(&[0.0, 1.0], &[3.0, 7.0], &StyleOptions::new())
            .unwrap();
        assert_eq!(series.inner().cells, vec![3, 7]);
        assert_eq!(series.data_bounds(Axis::Y, 0), Some(Range::new(3.0, 7.0)));

        series.clear();
        assert!(series.inner().cells.is_empty());
        assert_eq!(series.into_inner().updates, 2);
    }

    #[test]
    fn rejected_data_is_not_forwarded() {
        let mut series = adapter();
        assert!(series
            .set_data(&[0.0], &[1.0, 2.0], &StyleOptions::new())
            .is_err());
        assert_eq!(series.inner().updates, 0);
    }
}
