use crate::input::events::MouseButton;
use crate::input::tool::ToolError;
use crate::util::Point;
use log::trace;

use super::Editor;

impl Editor {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Mouse X coordinate in canvas pixels
    /// * `y` - Mouse Y coordinate in canvas pixels
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) -> Result<(), ToolError> {
        let Some(tool) = self.tool.as_mut() else {
            trace!("Mouse press with no active tool");
            return Ok(());
        };
        tool.on_mouse_down(&mut self.document, button, Point::new(x, y))?;
        self.refresh_redraw_flag();
        Ok(())
    }

    /// Processes mouse motion events.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) -> Result<(), ToolError> {
        let Some(tool) = self.tool.as_mut() else {
            return Ok(());
        };
        tool.on_mouse_move(&mut self.document, Point::new(x, y))?;
        self.refresh_redraw_flag();
        Ok(())
    }

    /// Processes mouse button release events.
    pub fn on_mouse_release(
        &mut self,
        button: MouseButton,
        x: f64,
        y: f64,
    ) -> Result<(), ToolError> {
        let Some(tool) = self.tool.as_mut() else {
            return Ok(());
        };
        tool.on_mouse_up(&mut self.document, button, Point::new(x, y))?;
        self.refresh_redraw_flag();
        Ok(())
    }
}
