//! Error type for document and layer operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while creating, loading, saving or inspecting a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Layer index {0} does not exist")]
    InvalidLayerIndex(usize),

    #[error("Pixel ({x}, {y}) lies outside the layer")]
    PixelOutOfBounds { x: i32, y: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG error for {path}: {source}")]
    Png {
        path: PathBuf,
        #[source]
        source: cairo::IoError,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
