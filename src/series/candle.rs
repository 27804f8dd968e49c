//! src/series/candle.rs
//!
//! OHLC candlestick series.

use crate::connector::StyleOptions;
use crate::error::Result;
use crate::format::format_plain;
use crate::range::{Axis, DataBounds, Range};

use super::leading::LeadingLineState;
use super::{LiveSeries, check_lengths, first_last, tail_bounds, tail_of};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl Candle {
    pub fn new(open: f64, close: f64, low: f64, high: f64) -> Self {
        Self {
            open,
            close,
            low,
            high,
        }
    }

    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Debug, Clone, Default)]
pub struct CandlestickSeries {
    x: Vec<f64>,
    candles: Vec<Candle>,
    style: StyleOptions,
    leading: Option<LeadingLineState>,
}

impl CandlestickSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leading_line(mut self, leading: LeadingLineState) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Body width: a third of the x spacing of the first two candles, or
    /// a third of a unit with fewer than two.
    pub fn body_width(&self) -> f64 {
        match self.x.as_slice() {
            [a, b, ..] => (b - a).abs() / 3.0,
            _ => 1.0 / 3.0,
        }
    }

    pub fn candles(&self) -> impl Iterator<Item = (f64, &Candle)> {
        self.x.iter().copied().zip(self.candles.iter())
    }
}

impl DataBounds for CandlestickSeries {
    fn data_bounds(&self, axis: Axis, tail: usize) -> Option<Range> {
        match axis {
            Axis::X => tail_bounds(&self.x, tail),
            Axis::Y => Range::from_values(
                tail_of(&self.candles, tail)
                    .iter()
                    .flat_map(|c| [c.low, c.high]),
            ),
        }
    }

    /// On y: open of the first candle, close of the last.
    fn first_last(&self, axis: Axis) -> Option<(f64, f64)> {
        match axis {
            Axis::X => first_last(&self.x),
            Axis::Y => Some((self.candles.first()?.open, self.candles.last()?.close)),
        }
    }
}

impl LiveSeries for CandlestickSeries {
    type Value = Candle;

    fn set_data(&mut self, x: &[f64], y: &[Candle], style: &StyleOptions) -> Result<()> {
        check_lengths(x.len(), y.len())?;
        self.x = x.to_vec();
        self.candles = y.to_vec();
        if !style.is_empty() {
            self.style = style.clone();
        }
        if let (Some(leading), Some(&lx), Some(last)) =
            (self.leading.as_mut(), self.x.last(), self.candles.last())
        {
            let label = format!(
                "[{}, {}, {}, {}]",
                format_plain(last.open),
                format_plain(last.close),
                format_plain(last.low),
                format_plain(last.high)
            );
            leading.update(lx, last.open, None, Some(label));
        }
        Ok(())
    }

    fn x_data(&self) -> &[f64] {
        &self.x
    }

    fn values(&self) -> &[Candle] {
        &self.candles
    }

    fn clear(&mut self) {
        self.x.clear();
        self.candles.clear();
        if let Some(leading) = self.leading.as_mut() {
            leading.clear();
        }
    }

    fn leading_line(&self) -> Option<&LeadingLineState> {
        self.leading.as_ref()
    }
}
