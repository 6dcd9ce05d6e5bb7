//! Library exports for the Move Selected Pixels tool.
//!
//! Exposes the document model, the tool framework and the configuration types
//! so that frontends (the bundled CLI, or an interactive canvas) can drive the
//! same lift / drag / commit logic.

pub mod config;
pub mod document;
pub mod draw;
pub mod input;
pub mod util;

pub use config::Config;
pub use document::{Document, LayerHost};
pub use input::{Editor, MoveSelectedTool};
