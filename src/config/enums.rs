//! Configuration enum types.

use crate::draw::{Color, color::*};
use crate::util::Point;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a fractional layer offset is snapped to whole pixels when composited.
///
/// Dragging produces fractional offsets; compositing always lands on the
/// pixel grid so moved pixels keep their exact values.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetSnap {
    /// Drop the fractional part (toward zero)
    #[default]
    Truncate,
    /// Round to the nearest pixel
    Round,
}

impl OffsetSnap {
    /// Snaps both coordinates of `offset`.
    pub fn apply(self, offset: Point) -> (f64, f64) {
        match self {
            OffsetSnap::Truncate => (offset.x.trunc(), offset.y.trunc()),
            OffsetSnap::Round => (offset.x.round(), offset.y.round()),
        }
    }
}

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// outline_color = "white"
///
/// # Custom RGB color (0-255 per component)
/// background = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black, none
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Named colors are mapped to predefined RGBA values using `util::name_to_color()`.
    /// Unknown color names fall back to `fallback` with a warning. RGB arrays are
    /// converted from 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::new(
                *r as f64 / 255.0,
                *g as f64 / 255.0,
                *b as f64 / 255.0,
                1.0,
            ),
        }
    }

    /// Converts to a [`Color`], treating unknown names as white.
    pub fn to_color(&self) -> Color {
        self.to_color_or(WHITE)
    }
}
