//! src/series/heatmap.rs
//!
//! Heat map series: each sample is one column of cell values. Cells sit on a
//! unit grid, column `i` spanning `[i, i + 1]` in x.

use crate::connector::StyleOptions;
use crate::error::{LiveError, Result};
use crate::range::{Axis, DataBounds, Range};

use super::{LiveSeries, check_lengths};

#[derive(Debug, Clone, Default)]
pub struct HeatMapSeries {
    x: Vec<f64>,
    columns: Vec<Vec<f64>>,
    rows: usize,
    levels: Option<Range>,
    x_labels: Vec<String>,
    y_labels: Vec<String>,
}

impl HeatMapSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, x_labels: Vec<String>, y_labels: Vec<String>) -> Self {
        self.x_labels = x_labels;
        self.y_labels = y_labels;
        self
    }

    pub fn x_labels(&self) -> &[String] {
        &self.x_labels
    }

    pub fn y_labels(&self) -> &[String] {
        &self.y_labels
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<f64> {
        self.columns.get(column)?.get(row).copied()
    }

    /// Pin the color scale. `None` goes back to the data extent.
    pub fn set_levels(&mut self, levels: Option<Range>) {
        self.levels = levels;
    }

    /// Color scale limits.
    pub fn levels(&self) -> Option<Range> {
        self.levels.or_else(|| {
            Range::from_values(self.columns.iter().flat_map(|c| c.iter().copied()))
        })
    }

    /// Cell value mapped onto `[0, 1]` by the current levels.
    pub fn normalized(&self, column: usize, row: usize) -> Option<f64> {
        let value = self.cell(column, row)?;
        let levels = self.levels()?;
        if levels.is_degenerate() {
            return Some(0.0);
        }
        Some(((value - levels.low) / levels.span()).clamp(0.0, 1.0))
    }
}

impl DataBounds for HeatMapSeries {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        if self.columns.is_empty() {
            return None;
        }
        match axis {
            Axis::X => {
                // grid edges run 0..=n
                let edges = self.columns.len() + 1;
                let taken = if tail == 0 { edges } else { tail.min(edges) };
                Some(Range::new((edges - taken) as f64, self.columns.len() as f64))
            }
            Axis::Y => Some(Range::new(0.0, self.rows as f64)),
        }
    }
}

impl LiveSeries for HeatMapSeries {
    type Value = Vec<f64>;

    fn set_data(&mut self, x: &[f64], y: &[Vec<f64>], _style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        let rows = y.first().map_or(0, Vec::len);
        if let Some(column) = y.iter().find(|c| c.len() != rows) {
            return Err(LiveError::LengthMismatch {
                x_len: rows,
                y_len: column.len(),
            });
        }
        self.x = x.to_vec();
        self.columns = y.to_vec();
        self.rows = rows;
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.x
    }

    fn values(&self) -> &[Vec<f64>] {
        &self.columns
    }

    fn clear(&mut self) {
        self.x.clear();
        self.columns.clear();
        self.rows = 0;
    }
}
