use crate::config::{Config, OffsetSnap};
use crate::document::LayerHost;
use crate::draw::render;
use crate::util::Point;
use log::debug;

use super::events::MouseButton;
use super::tool::{Tool, ToolError};

/// Lifts the selected pixels into a floating layer and drags them around.
///
/// # Behavior
/// - Press: lifts the selection into the selection layer (first press only)
///   and starts a drag.
/// - Drag: moves the selection outline and the floating pixels together.
/// - Release: ends the drag; the pixels keep floating.
/// - Deactivation: composites the floating pixels back onto the current layer.
///
/// Any mouse button drives the gesture.
#[derive(Debug, Clone)]
pub struct MoveSelectedTool {
    origin: Point,
    is_dragging: bool,
    has_uncommitted: bool,
    snap: OffsetSnap,
    outline_width: f64,
}

impl Default for MoveSelectedTool {
    fn default() -> Self {
        Self::new(OffsetSnap::default(), 1.0)
    }
}

impl MoveSelectedTool {
    /// Creates the tool.
    ///
    /// # Arguments
    /// * `snap` - How the floating offset lands on the pixel grid at commit
    /// * `outline_width` - Width of the drawn selection outline, used to size repaint regions
    pub fn new(snap: OffsetSnap, outline_width: f64) -> Self {
        Self {
            origin: Point::ORIGIN,
            is_dragging: false,
            has_uncommitted: false,
            snap,
            outline_width,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.commit.offset_snap, config.selection.outline_width)
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// True while lifted pixels are floating and not yet composited back.
    pub fn has_uncommitted(&self) -> bool {
        self.has_uncommitted
    }

    /// Copies the selected pixels of the current layer into a new selection
    /// layer, then clears them from the current layer.
    fn lift(&self, host: &mut dyn LayerHost) -> Result<(), ToolError> {
        let source = host.current_layer().surface().clone();
        let path = host.selection_path().clone();

        host.create_selection_layer()?;
        host.set_show_selection_layer(true);

        let floating = host
            .selection_layer()
            .ok_or(ToolError::MissingSelectionLayer("lift"))?;
        {
            let ctx = floating.context()?;
            path.append_to(&ctx);
            ctx.set_source_surface(&source, 0.0, 0.0)?;
            ctx.clip();
            ctx.paint()?;
        }

        let ctx = host.current_layer().context()?;
        path.append_to(&ctx);
        ctx.set_operator(cairo::Operator::Clear);
        ctx.fill()?;

        debug!("Lifted selection {:?} into floating layer", path.bounds());
        Ok(())
    }
}

impl Tool for MoveSelectedTool {
    fn name(&self) -> &'static str {
        "Move Selected Pixels"
    }

    fn icon(&self) -> &'static str {
        "Tools.Move.png"
    }

    fn status_bar_text(&self) -> &'static str {
        "Drag the selection to move selected pixels."
    }

    fn on_mouse_down(
        &mut self,
        host: &mut dyn LayerHost,
        _button: MouseButton,
        point: Point,
    ) -> Result<(), ToolError> {
        self.origin = point;
        self.is_dragging = true;

        if !self.has_uncommitted {
            self.lift(host)?;
        }

        self.has_uncommitted = true;
        host.invalidate(None);
        Ok(())
    }

    fn on_mouse_move(&mut self, host: &mut dyn LayerHost, point: Point) -> Result<(), ToolError> {
        if !self.is_dragging {
            return Ok(());
        }

        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;

        let floating = host
            .selection_layer_mut()
            .ok_or(ToolError::MissingSelectionLayer("move"))?;
        floating.set_offset(floating.offset().offset_by(dx, dy));

        let before = host.selection_path().damage_rect(self.outline_width);
        let moved = host.selection_path().translated(dx, dy);
        let after = moved.damage_rect(self.outline_width);
        host.set_selection_path(moved);

        self.origin = point;

        // The floating pixels never extend past the outline, so its old and new
        // bounds cover everything that changed on screen.
        let damage = match (before, after) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (a, b) => a.or(b),
        };
        if let Some(region) = damage {
            host.invalidate(Some(region));
        }
        Ok(())
    }

    fn on_mouse_up(
        &mut self,
        _host: &mut dyn LayerHost,
        _button: MouseButton,
        _point: Point,
    ) -> Result<(), ToolError> {
        self.is_dragging = false;
        Ok(())
    }

    fn on_deactivated(&mut self, host: &mut dyn LayerHost) -> Result<(), ToolError> {
        self.is_dragging = false;

        if !self.has_uncommitted {
            debug!("Nothing floating; deactivating without commit");
            return Ok(());
        }

        let floating = host
            .selection_layer()
            .ok_or(ToolError::MissingSelectionLayer("commit"))?;
        let offset = floating.offset();
        {
            let ctx = host.current_layer().context()?;
            render::render_layer(&ctx, floating, self.snap)?;
        }

        host.destroy_selection_layer();
        self.has_uncommitted = false;
        host.invalidate(None);

        debug!(
            "Committed floating pixels at {:?}",
            self.snap.apply(offset)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Pixel};

    const RED: Pixel = Pixel {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
    const BLUE: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 255,
        a: 255,
    };

    /// 40x40 document with a red 10x10 square at (10, 10), selected.
    fn document_with_selected_square() -> Document {
        let mut doc = Document::new(40, 40).unwrap();
        {
            let ctx = doc.current_layer().context().unwrap();
            ctx.set_source_rgb(1.0, 0.0, 0.0);
            ctx.rectangle(10.0, 10.0, 10.0, 10.0);
            ctx.fill().unwrap();
        }
        doc.select_rect(10.0, 10.0, 10.0, 10.0);
        doc.take_dirty_regions();
        doc
    }

    fn pixel(doc: &Document, x: i32, y: i32) -> Pixel {
        doc.current_layer().pixel(x, y).unwrap()
    }

    fn drag(tool: &mut MoveSelectedTool, doc: &mut Document, from: (f64, f64), to: (f64, f64)) {
        tool.on_mouse_down(doc, MouseButton::Left, Point::new(from.0, from.1))
            .unwrap();
        tool.on_mouse_move(doc, Point::new(to.0, to.1)).unwrap();
        tool.on_mouse_up(doc, MouseButton::Left, Point::new(to.0, to.1))
            .unwrap();
    }

    #[test]
    fn metadata_describes_tool() {
        let tool = MoveSelectedTool::default();
        assert_eq!(tool.name(), "Move Selected Pixels");
        assert_eq!(tool.icon(), "Tools.Move.png");
        assert!(tool.enabled());
        assert!(!tool.status_bar_text().is_empty());
    }

    #[test]
    fn press_lifts_selection_into_floating_layer() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(15.0, 15.0))
            .unwrap();

        assert!(tool.is_dragging());
        assert!(tool.has_uncommitted());
        assert!(doc.show_selection_layer());
        assert!(pixel(&doc, 15, 15).is_clear());
        assert_eq!(doc.selection_layer().unwrap().pixel(15, 15).unwrap(), RED);
        assert_eq!(doc.take_dirty_regions(), vec![crate::util::Rect::new(0, 0, 40, 40).unwrap()]);
    }

    #[test]
    fn lift_leaves_pixels_outside_selection() {
        let mut doc = Document::new(40, 40).unwrap();
        {
            let ctx = doc.current_layer().context().unwrap();
            ctx.set_source_rgb(0.0, 0.0, 1.0);
            ctx.paint().unwrap();
        }
        doc.select_rect(10.0, 10.0, 10.0, 10.0);
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(15.0, 15.0))
            .unwrap();

        assert_eq!(pixel(&doc, 5, 5), BLUE);
        assert_eq!(pixel(&doc, 20, 20), BLUE);
        assert!(pixel(&doc, 19, 19).is_clear());
        let floating = doc.selection_layer().unwrap();
        assert!(floating.pixel(5, 5).unwrap().is_clear());
        assert_eq!(floating.pixel(10, 10).unwrap(), BLUE);
    }

    #[test]
    fn ellipse_selection_keeps_corners() {
        let mut doc = Document::new(40, 40).unwrap();
        {
            let ctx = doc.current_layer().context().unwrap();
            ctx.set_source_rgb(1.0, 0.0, 0.0);
            ctx.paint().unwrap();
        }
        doc.select_ellipse(10.0, 10.0, 20.0, 20.0);
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(20.0, 20.0))
            .unwrap();

        assert_eq!(pixel(&doc, 11, 11), RED);
        assert!(pixel(&doc, 20, 20).is_clear());
    }

    #[test]
    fn drag_moves_outline_and_floating_layer_together() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(15.0, 15.0))
            .unwrap();
        tool.on_mouse_move(&mut doc, Point::new(18.0, 16.0)).unwrap();
        tool.on_mouse_move(&mut doc, Point::new(20.0, 18.0)).unwrap();

        assert_eq!(doc.selection_path().bounds(), Some((15.0, 13.0, 25.0, 23.0)));
        assert_eq!(doc.selection_layer().unwrap().offset(), Point::new(5.0, 3.0));
    }

    #[test]
    fn drag_damages_old_and_new_outline() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::new(OffsetSnap::Truncate, 2.0);

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(15.0, 15.0))
            .unwrap();
        doc.take_dirty_regions();
        tool.on_mouse_move(&mut doc, Point::new(25.0, 15.0)).unwrap();

        // Outline spans 10..30 x 10..20 before/after, padded by 2px.
        assert_eq!(
            doc.take_dirty_regions(),
            vec![crate::util::Rect::new(8, 8, 24, 14).unwrap()]
        );
    }

    #[test]
    fn motion_without_press_is_ignored() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_move(&mut doc, Point::new(30.0, 30.0)).unwrap();

        assert!(doc.selection_layer().is_none());
        assert_eq!(doc.selection_path().bounds(), Some((10.0, 10.0, 20.0, 20.0)));
        assert_eq!(pixel(&doc, 15, 15), RED);
        assert!(!doc.has_pending_damage());
    }

    #[test]
    fn release_ends_drag_but_keeps_pixels_floating() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (20.0, 15.0));
        tool.on_mouse_move(&mut doc, Point::new(35.0, 35.0)).unwrap();

        assert!(!tool.is_dragging());
        assert!(tool.has_uncommitted());
        assert_eq!(doc.selection_layer().unwrap().offset(), Point::new(5.0, 0.0));
    }

    #[test]
    fn deactivate_commits_at_offset() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (25.0, 15.0));
        tool.on_deactivated(&mut doc).unwrap();

        assert_eq!(pixel(&doc, 25, 15), RED);
        assert_eq!(pixel(&doc, 20, 10), RED);
        assert!(pixel(&doc, 12, 15).is_clear());
        assert!(pixel(&doc, 30, 15).is_clear());
        assert!(doc.selection_layer().is_none());
        assert!(!doc.show_selection_layer());
        assert!(!tool.has_uncommitted());
        assert_eq!(doc.selection_path().bounds(), Some((20.0, 10.0, 30.0, 20.0)));
    }

    #[test]
    fn second_press_keeps_moving_floating_pixels() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (25.0, 15.0));
        drag(&mut tool, &mut doc, (25.0, 15.0), (30.0, 15.0));
        tool.on_deactivated(&mut doc).unwrap();

        assert_eq!(pixel(&doc, 25, 15), RED);
        assert_eq!(pixel(&doc, 34, 19), RED);
        assert!(pixel(&doc, 24, 15).is_clear());
    }

    #[test]
    fn fractional_offset_truncates_toward_zero() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (19.7, 15.0));
        tool.on_deactivated(&mut doc).unwrap();

        assert!(pixel(&doc, 13, 15).is_clear());
        assert_eq!(pixel(&doc, 14, 15), RED);
        assert_eq!(pixel(&doc, 23, 15), RED);
        assert!(pixel(&doc, 24, 15).is_clear());
    }

    #[test]
    fn negative_fractional_offset_truncates_toward_zero() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (10.3, 15.0));
        tool.on_deactivated(&mut doc).unwrap();

        assert!(pixel(&doc, 5, 15).is_clear());
        assert_eq!(pixel(&doc, 6, 15), RED);
        assert_eq!(pixel(&doc, 15, 15), RED);
        assert!(pixel(&doc, 16, 15).is_clear());
    }

    #[test]
    fn round_snap_uses_nearest_pixel() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::new(OffsetSnap::Round, 1.0);

        drag(&mut tool, &mut doc, (15.0, 15.0), (19.7, 15.0));
        tool.on_deactivated(&mut doc).unwrap();

        assert!(pixel(&doc, 14, 15).is_clear());
        assert_eq!(pixel(&doc, 24, 15), RED);
    }

    #[test]
    fn commit_uses_floating_layer_opacity() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        drag(&mut tool, &mut doc, (15.0, 15.0), (15.0, 15.0));
        doc.selection_layer_mut().unwrap().set_opacity(0.5);
        tool.on_deactivated(&mut doc).unwrap();

        let alpha = pixel(&doc, 15, 15).a;
        assert!((120..=135).contains(&alpha), "alpha was {alpha}");
    }

    #[test]
    fn deactivate_without_lift_is_noop() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_deactivated(&mut doc).unwrap();

        assert_eq!(pixel(&doc, 15, 15), RED);
        assert!(!doc.has_pending_damage());
    }

    #[test]
    fn deactivate_during_drag_commits_and_stops_dragging() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Right, Point::new(15.0, 15.0))
            .unwrap();
        tool.on_mouse_move(&mut doc, Point::new(15.0, 25.0)).unwrap();
        tool.on_deactivated(&mut doc).unwrap();

        assert!(!tool.is_dragging());
        assert_eq!(pixel(&doc, 15, 25), RED);
        assert!(pixel(&doc, 15, 15).is_clear());
    }

    #[test]
    fn missing_floating_layer_is_reported() {
        let mut doc = document_with_selected_square();
        let mut tool = MoveSelectedTool::default();

        tool.on_mouse_down(&mut doc, MouseButton::Left, Point::new(15.0, 15.0))
            .unwrap();
        doc.destroy_selection_layer();

        assert!(matches!(
            tool.on_mouse_move(&mut doc, Point::new(20.0, 20.0)),
            Err(ToolError::MissingSelectionLayer("move"))
        ));
        assert!(matches!(
            tool.on_deactivated(&mut doc),
            Err(ToolError::MissingSelectionLayer("commit"))
        ));
    }
}
