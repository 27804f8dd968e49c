//! src/series/leading.rs
//!
//! Leading lines: markers that follow the most recently plotted value,
//! with a label showing the value of one axis.

use std::str::FromStr;

use crate::connector::StyleOptions;
use crate::error::LiveError;
use crate::format::format_plain;
use crate::range::Axis;

/// Line orientation. A vertical line marks an x value, a horizontal one a
/// y value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = LiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            _ => Err(LiveError::UnsupportedOrientation(s.to_string())),
        }
    }
}

/// Orientation of the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOrientation {
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

impl FromStr for TextOrientation {
    type Err = LiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(TextOrientation::Auto),
            "horizontal" => Ok(TextOrientation::Horizontal),
            "vertical" => Ok(TextOrientation::Vertical),
            _ => Err(LiveError::UnsupportedOrientation(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadingLine {
    pub orientation: Orientation,
    /// Axis whose value the label shows.
    pub text_axis: Axis,
    pub text_orientation: TextOrientation,
    pub style: StyleOptions,
    /// Current line position in data coordinates.
    pub pos: f64,
    pub text: String,
}

impl LeadingLine {
    /// Label rotation in degrees.
    pub fn text_angle(&self) -> i32 {
        match (self.orientation, self.text_orientation) {
            (Orientation::Vertical, TextOrientation::Horizontal) => 0,
            (Orientation::Vertical, _) => -90,
            (Orientation::Horizontal, TextOrientation::Vertical) => -90,
            (Orientation::Horizontal, _) => 0,
        }
    }
}

/// Optional vertical and horizontal leading lines of one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadingLineState {
    vertical: Option<LeadingLine>,
    horizontal: Option<LeadingLine>,
}

impl LeadingLineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the line of `orientation`.
    pub fn set_leading_line(
        &mut self,
        orientation: Orientation,
        text_axis: Axis,
        text_orientation: TextOrientation,
        style: StyleOptions,
    ) -> &LeadingLine {
        let line = LeadingLine {
            orientation,
            text_axis,
            text_orientation,
            style,
            pos: 0.0,
            text: String::new(),
        };
        let slot = match orientation {
            Orientation::Vertical => &mut self.vertical,
            Orientation::Horizontal => &mut self.horizontal,
        };
        slot.insert(line)
    }

    /// Same as [`set_leading_line`](Self::set_leading_line) with textual
    /// identifiers, e.g. `("vertical", "x")`.
    pub fn set_leading_line_str(
        &mut self,
        orientation: &str,
        text_axis: &str,
    ) -> Result<&LeadingLine, LiveError> {
        let orientation = orientation.parse()?;
        let text_axis = text_axis.parse()?;
        Ok(self.set_leading_line(
            orientation,
            text_axis,
            TextOrientation::Auto,
            StyleOptions::new(),
        ))
    }

    pub fn vertical(&self) -> Option<&LeadingLine> {
        self.vertical.as_ref()
    }

    pub fn horizontal(&self) -> Option<&LeadingLine> {
        self.horizontal.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// Move both lines to the last point and refresh their labels. Explicit
    /// texts override the default rounding.
    pub fn update(&mut self, x: f64, y: f64, x_text: Option<String>, y_text: Option<String>) {
        let x_text = x_text.unwrap_or_else(|| format_plain(x));
        let y_text = y_text.unwrap_or_else(|| format_plain(y));
        if let Some(line) = self.vertical.as_mut() {
            line.pos = x;
            line.text = pick(line.text_axis, &x_text, &y_text);
        }
        if let Some(line) = self.horizontal.as_mut() {
            line.pos = y;
            line.text = pick(line.text_axis, &x_text, &y_text);
        }
    }

    pub fn clear(&mut self) {
        self.update(0.0, 0.0, None, None);
    }
}

fn pick(axis: Axis, x_text: &str, y_text: &str) -> String {
    match axis {
        Axis::X => x_text.to_string(),
        Axis::Y => y_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_moves_lines_and_labels() {
        let mut state = LeadingLineState::new();
        state.set_leading_line(
            Orientation::Vertical,
            Axis::X,
            TextOrientation::Auto,
            StyleOptions::new(),
        );
        state.set_leading_line(
            Orientation::Horizontal,
            Axis::Y,
            TextOrientation::Auto,
            StyleOptions::new(),
        );
        state.update(12.0, 0.123456, None, None);

        let v = state.vertical().unwrap();
        assert_eq!(v.pos, 12.0);
        assert_eq!(v.text, "12");
        let h = state.horizontal().unwrap();
        assert_eq!(h.pos, 0.123456);
        assert_eq!(h.text, "0.1235");
    }

    #[test]
    fn unsupported_identifiers_are_rejected() {
        let mut state = LeadingLineState::new();
        assert_eq!(
            state.set_leading_line_str("diagonal", "x").unwrap_err(),
            LiveError::UnsupportedOrientation("diagonal".into())
        );
        assert_eq!(
            state.set_leading_line_str("vertical", "z").unwrap_err(),
            LiveError::UnsupportedAxis("z".into())
        );
        assert!(state.is_empty());
    }

    #[test]
    fn text_angles() {
        let mut state = LeadingLineState::new();
        let angle = state
            .set_leading_line(
                Orientation::Vertical,
                Axis::Y,
                TextOrientation::Auto,
                StyleOptions::new(),
            )
            .text_angle();
        assert_eq!(angle, -90);
        let angle = state
            .set_leading_line(
                Orientation::Horizontal,
                Axis::Y,
                TextOrientation::Vertical,
                StyleOptions::new(),
            )
            .text_angle();
        assert_eq!(angle, -90);
    }

    #[test]
    fn clear_resets_position() {
        let mut state = LeadingLineState::new();
        state.set_leading_line_str("v", "y").unwrap();
        state.update(3.0, 4.0, None, Some("four".into()));
        assert_eq!(state.vertical().unwrap().text, "four");
        state.clear();
        assert_eq!(state.vertical().unwrap().pos, 0.0);
        assert_eq!(state.vertical().unwrap().text, "0");
    }
}
