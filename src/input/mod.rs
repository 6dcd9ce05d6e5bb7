//! Input handling and editing tools.
//!
//! This module turns backend pointer events into edits. The [`Editor`] owns the
//! document and the active [`Tool`]; tools implement the per-gesture state
//! machines, such as [`MoveSelectedTool`] lifting and dragging selected pixels.

pub mod events;
pub mod move_selected;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::MouseButton;
pub use move_selected::MoveSelectedTool;
pub use state::Editor;
pub use tool::{Tool, ToolError};
