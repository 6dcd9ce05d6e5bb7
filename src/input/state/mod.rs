mod core;
mod mouse;

pub use core::Editor;
