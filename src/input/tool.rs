//! Editing tool interface.

use crate::document::{DocumentError, LayerHost};
use crate::util::Point;
use thiserror::Error;

use super::events::MouseButton;

/// Errors a tool can raise while handling an event.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("No floating selection layer to {0}")]
    MissingSelectionLayer(&'static str),
}

/// An interactive editing tool.
///
/// The host delivers pointer events in canvas coordinates between an
/// `on_activated` / `on_deactivated` pair. Tools keep only per-gesture state
/// and make every change through the [`LayerHost`] they are handed.
pub trait Tool {
    /// Human-readable tool name.
    fn name(&self) -> &'static str;

    /// Icon resource name.
    fn icon(&self) -> &'static str;

    /// Hint shown in the status bar while the tool is active.
    fn status_bar_text(&self) -> &'static str;

    fn enabled(&self) -> bool {
        true
    }

    fn on_activated(&mut self, _host: &mut dyn LayerHost) -> Result<(), ToolError> {
        Ok(())
    }

    fn on_mouse_down(
        &mut self,
        host: &mut dyn LayerHost,
        button: MouseButton,
        point: Point,
    ) -> Result<(), ToolError>;

    fn on_mouse_move(&mut self, host: &mut dyn LayerHost, point: Point) -> Result<(), ToolError>;

    fn on_mouse_up(
        &mut self,
        host: &mut dyn LayerHost,
        button: MouseButton,
        point: Point,
    ) -> Result<(), ToolError>;

    fn on_deactivated(&mut self, _host: &mut dyn LayerHost) -> Result<(), ToolError> {
        Ok(())
    }
}
