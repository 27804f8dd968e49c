//! src/connector/buffer.rs
//!
//! Bounded x/y storage owned by a data connector.
//!
//! Maintains `x.len() == y.len()` after every mutation; when bounded, the
//! oldest points are evicted first.

use std::collections::VecDeque;

use super::config::Capacity;
use crate::range::{Axis, DataBounds, Range};

#[derive(Debug, Clone)]
pub struct SeriesBuffer<Y> {
    x: VecDeque<f64>,
    y: VecDeque<Y>,
    capacity: Capacity,
}

impl<Y: Clone> SeriesBuffer<Y> {
    pub fn new(capacity: Capacity) -> Self {
        let initial = capacity.limit().unwrap_or(0).min(4_096);
        Self {
            x: VecDeque::with_capacity(initial),
            y: VecDeque::with_capacity(initial),
            capacity,
        }
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn last_x(&self) -> Option<f64> {
        self.x.back().copied()
    }

    /// x value the next synthesized point receives.
    pub fn next_x(&self) -> f64 {
        self.last_x().map(|x| x + 1.0).unwrap_or(0.0)
    }

    /// Push one point, evicting the oldest one when full.
    pub fn push(&mut self, x: f64, y: Y) {
        if let Some(limit) = self.capacity.limit() {
            while self.y.len() >= limit {
                self.x.pop_front();
                self.y.pop_front();
            }
        }
        self.x.push_back(x);
        self.y.push_back(y);
    }

    /// Append pairs in order. Callers guarantee equal lengths.
    pub fn extend<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = (f64, Y)>,
    {
        for (x, y) in points {
            self.push(x, y);
        }
    }

    /// Replace all contents, keeping only the newest `capacity` points.
    /// Without `xs` the kept points are numbered `0..len`.
    pub fn replace(&mut self, xs: Option<Vec<f64>>, ys: Vec<Y>) {
        self.clear();
        let skip = match self.capacity.limit() {
            Some(limit) => ys.len().saturating_sub(limit),
            None => 0,
        };
        self.y.extend(ys.into_iter().skip(skip));
        match xs {
            Some(xs) => self.x.extend(xs.into_iter().skip(skip)),
            None => self.x.extend((0..self.y.len()).map(|i| i as f64)),
        }
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    pub fn x(&self) -> impl ExactSizeIterator<Item = &f64> + '_ {
        self.x.iter()
    }

    pub fn y(&self) -> impl ExactSizeIterator<Item = &Y> + '_ {
        self.y.iter()
    }

    /// Owned copies handed out in events.
    pub fn snapshot(&self) -> (Vec<f64>, Vec<Y>) {
        (
            self.x.iter().copied().collect(),
            self.y.iter().cloned().collect(),
        )
    }
}

impl SeriesBuffer<f64> {
    /// x bounds of the buffer (first, last)
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        Some((*self.x.front()?, *self.x.back()?))
    }

    /// (min, max, last) over the buffered y values, `None` when empty or
    /// when no value is finite.
    pub fn stats(&self) -> Option<(f64, f64, f64)> {
        let range = Range::from_values(self.y.iter().copied())?;
        let last = self.y.back().copied()?;
        Some((range.low, range.high, last))
    }
}

impl DataBounds for SeriesBuffer<f64> {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        let values = match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        };
        let skip = if tail == 0 {
            0
        } else {
            values.len().saturating_sub(tail)
        };
        Range::from_values(values.iter().skip(skip).copied())
    }

    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        let values = match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        };
        Some((*values.front()?, *values.back()?))
    }
}
