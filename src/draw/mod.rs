//! Rendering primitives (Cairo-based).
//!
//! This module defines the drawing types shared by the document and the tools:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`SelectionPath`]: the vector outline of the current selection
//! - [`DirtyTracker`]: damage rectangles waiting for a repaint
//! - Rendering functions for compositing layers and the selection outline

pub mod color;
pub mod dirty;
pub mod path;
pub mod render;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use path::{PathSegment, SelectionPath};
pub use render::{OutlineStyle, RenderOptions, render_layer, render_selection_outline};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
