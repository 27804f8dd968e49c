//! src/series/categorized.rs
//!
//! Categorized bar series: each sample is the set of categories active at
//! that x. Consecutive samples sharing a category merge into one span, drawn
//! as a horizontal bar on the category's row.

use crate::connector::StyleOptions;
use crate::error::{LiveError, Result};
use crate::range::{Axis, DataBounds, Range};

use super::leading::LeadingLineState;
use super::{LiveSeries, check_lengths, first_last, tail_bounds};

/// One contiguous run of a category, `[start, end]` in x.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpan {
    /// Row index into [`CategorizedBarSeries::categories`].
    pub category: usize,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone)]
pub struct CategorizedBarSeries {
    x: Vec<f64>,
    samples: Vec<Vec<String>>,
    categories: Vec<String>,
    // categories given up front; the rest were discovered in data
    declared: usize,
    bar_height: f64,
    spans: Vec<CategorySpan>,
    leading: Option<LeadingLineState>,
}

impl CategorizedBarSeries {
    /// `bar_height` is the fraction of a row a bar fills, in `[0, 1]`.
    pub fn new(categories: Vec<String>, bar_height: f64) -> Result<Self> {
        check_bar_height(bar_height)?;
        Ok(Self {
            x: Vec::new(),
            samples: Vec::new(),
            declared: categories.len(),
            categories,
            bar_height,
            spans: Vec::new(),
            leading: None,
        })
    }

    pub fn with_leading_line(mut self, leading: LeadingLineState) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn set_bar_height(&mut self, bar_height: f64) -> Result<()> {
        check_bar_height(bar_height)?;
        self.bar_height = bar_height;
        Ok(())
    }

    pub fn bar_height(&self) -> f64 {
        self.bar_height
    }

    /// Known categories in row order. Unseen categories are appended as they
    /// show up in data.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == name)
    }

    pub fn spans(&self) -> &[CategorySpan] {
        &self.spans
    }

    fn row_of(&mut self, name: &str) -> usize {
        match self.category_index(name) {
            Some(index) => index,
            None => {
                self.categories.push(name.to_string());
                self.categories.len() - 1
            }
        }
    }

    fn rebuild_spans(&mut self) {
        let mut spans = Vec::new();
        // open runs in the order they started
        let mut open: Vec<(usize, f64)> = Vec::new();

        let x = std::mem::take(&mut self.x);
        let samples = std::mem::take(&mut self.samples);
        for (&at, active) in x.iter().zip(&samples) {
            let rows: Vec<usize> = active.iter().map(|name| self.row_of(name)).collect();
            for &row in &rows {
                if !open.iter().any(|(r, _)| *r == row) {
                    open.push((row, at));
                }
            }
            open.retain(|&(row, start)| {
                let still_active = rows.contains(&row);
                if !still_active {
                    spans.push(CategorySpan {
                        category: row,
                        start,
                        end: at,
                    });
                }
                still_active
            });
        }
        if let Some(&last) = x.last() {
            spans.extend(open.into_iter().map(|(row, start)| CategorySpan {
                category: row,
                start,
                end: last,
            }));
        }
        self.x = x;
        self.samples = samples;
        self.spans = spans;
    }
}

fn check_bar_height(bar_height: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&bar_height) {
        return Err(LiveError::InvalidBarHeight(bar_height));
    }
    Ok(())
}

impl DataBounds for CategorizedBarSeries {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        match axis {
            Axis::X => tail_bounds(&self.x, tail),
            Axis::Y => {
                if self.x.is_empty() {
                    return None;
                }
                let half = self.bar_height / 2.0;
                let rows = self.categories.len() as f64;
                Some(Range::new(-half, rows - (1.0 - half)))
            }
        }
    }

    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => first_last(&self.x),
            Axis::Y => None,
        }
    }
}

impl LiveSeries for CategorizedBarSeries {
    type Value = Vec<String>;

    fn set_data(&mut self, x: &[f64], y: &[Vec<String>], _style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        self.x = x.to_vec();
        self.samples = y.to_vec();
        self.rebuild_spans();

        if let (Some(&lx), Some(last)) = (self.x.last(), self.samples.last()) {
            let label = last.join(", ");
            let ly = self.categories.len().saturating_sub(1) as f64;
            if let Some(leading) = self.leading.as_mut() {
                leading.update(lx, ly, None, Some(label));
            }
        }
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.x
    }

    fn values(&self) -> &[Vec<String>] {
        &self.samples
    }

    /// Drops data and the categories discovered from it. Declared
    /// categories keep their rows.
    fn clear(&mut self) {
        self.x.clear();
        self.samples.clear();
        self.spans.clear();
        self.categories.truncate(self.declared);
        if let Some(leading) = self.leading.as_mut() {
            leading.clear();
        }
    }

    fn leading_line(&self) -> Option<&LeadingLineState> {
        self.leading.as_ref()
    }
}
