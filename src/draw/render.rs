//! Cairo-based compositing of layers and the selection outline.

use super::color::Color;
use super::path::SelectionPath;
use crate::config::OffsetSnap;
use crate::document::Layer;

/// Dashed outline appearance for the selection ("marching ants").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    /// Stroke width in pixels
    pub width: f64,
    /// Length of each dash and each gap
    pub dash_length: f64,
    /// Dash color, drawn over a dark solid underlay
    pub color: Color,
}

/// Options for flattening a document into a single image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Painted before any layer; transparent leaves the canvas empty
    pub background: Color,
    /// Draw the selection outline on top when set
    pub outline: Option<OutlineStyle>,
    /// Pixel snapping for layer offsets
    pub snap: OffsetSnap,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: super::color::TRANSPARENT,
            outline: None,
            snap: OffsetSnap::default(),
        }
    }
}

/// Fills the canvas with the background color unless it is transparent.
pub fn render_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    if color.is_transparent() {
        return Ok(());
    }
    color.apply(ctx);
    ctx.paint()
}

/// Paints `layer` onto `ctx` at its snapped offset using the layer opacity.
///
/// Used both for on-screen compositing and for committing floating pixels
/// back onto their layer.
pub fn render_layer(
    ctx: &cairo::Context,
    layer: &Layer,
    snap: OffsetSnap,
) -> Result<(), cairo::Error> {
    let (x, y) = snap.apply(layer.offset());
    ctx.save()?;
    ctx.set_source_surface(layer.surface(), x, y)?;
    let painted = ctx.paint_with_alpha(layer.opacity());
    ctx.restore()?;
    painted
}

/// Strokes the selection outline: a dark solid line with light dashes on top.
pub fn render_selection_outline(
    ctx: &cairo::Context,
    path: &SelectionPath,
    style: &OutlineStyle,
) -> Result<(), cairo::Error> {
    if path.is_empty() {
        return Ok(());
    }

    ctx.save()?;
    ctx.new_path();
    path.append_to(ctx);
    ctx.set_line_width(style.width);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.8);
    ctx.stroke_preserve()?;

    style.color.apply(ctx);
    ctx.set_dash(&[style.dash_length, style.dash_length], 0.0);
    ctx.stroke()?;
    ctx.restore()
}
