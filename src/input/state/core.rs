//! Editor session: the document plus the active tool.

use crate::document::Document;
use crate::input::tool::{Tool, ToolError};
use crate::util::Rect;
use log::{info, warn};

/// Main editing session state.
///
/// Owns the [`Document`] and the active [`Tool`], routes pointer events to the
/// tool, and tracks whether the canvas needs a repaint. Switching or dropping
/// the tool always runs its deactivation hook first, so floating edits are
/// committed before another tool sees the document.
pub struct Editor {
    /// The image being edited
    pub document: Document,
    /// Currently active tool, if any
    pub(super) tool: Option<Box<dyn Tool>>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl Editor {
    /// Creates a session with no active tool.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            tool: None,
            needs_redraw: true,
        }
    }

    /// Makes `tool` the active tool, deactivating the previous one first.
    ///
    /// Disabled tools are refused with a warning and leave the current tool active.
    pub fn activate_tool(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        if !tool.enabled() {
            warn!("Tool '{}' is disabled; keeping current tool", tool.name());
            return Ok(());
        }

        self.deactivate_tool()?;

        let mut tool = tool;
        tool.on_activated(&mut self.document)?;
        info!("Activated tool: {}", tool.name());
        self.tool = Some(tool);
        self.refresh_redraw_flag();
        Ok(())
    }

    /// Deactivates and returns the active tool.
    ///
    /// If deactivation fails the tool stays active so the caller can retry.
    pub fn deactivate_tool(&mut self) -> Result<Option<Box<dyn Tool>>, ToolError> {
        let Some(mut tool) = self.tool.take() else {
            return Ok(None);
        };

        if let Err(err) = tool.on_deactivated(&mut self.document) {
            self.tool = Some(tool);
            return Err(err);
        }

        info!("Deactivated tool: {}", tool.name());
        self.refresh_redraw_flag();
        Ok(Some(tool))
    }

    pub fn active_tool(&self) -> Option<&dyn Tool> {
        self.tool.as_deref()
    }

    /// Status bar hint of the active tool.
    pub fn status_text(&self) -> Option<&'static str> {
        self.tool.as_ref().map(|tool| tool.status_bar_text())
    }

    /// Drains repaint regions and clears the redraw flag.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.needs_redraw = false;
        self.document.take_dirty_regions()
    }

    pub(super) fn refresh_redraw_flag(&mut self) {
        if self.document.has_pending_damage() {
            self.needs_redraw = true;
        }
    }
}
