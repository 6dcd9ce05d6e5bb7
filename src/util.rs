//! Utility types for canvas geometry and color names.
//!
//! This module provides:
//! - [`Point`]: floating-point canvas coordinates delivered by pointer events
//! - [`Rect`]: integer rectangles used for damage tracking
//! - Color name lookup used by the configuration system

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
/// - "none" / "transparent" for a fully transparent color
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "none" | "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A position on the canvas in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset_by(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be non-negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Builds the smallest integer rectangle covering fractional bounds.
    ///
    /// `padding` is added on every side (e.g. half an outline width).
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64, padding: f64) -> Option<Self> {
        Self::from_min_max(
            (min_x - padding).floor() as i32,
            (min_y - padding).floor() as i32,
            (max_x + padding).ceil() as i32,
            (max_y + padding).ceil() as i32,
        )
    }

    /// Returns a rectangle that covers both input rectangles.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
