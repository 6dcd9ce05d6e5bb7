//! Document model: layer stack, selection, and the floating selection layer.
//!
//! Tools never reach into [`Document`] directly. They drive it through the
//! [`LayerHost`] trait, which exposes only what an editing tool needs: the
//! current layer, the selection path, the temporary selection layer, and
//! repaint requests.

mod error;
mod layer;

pub use error::DocumentError;
pub use layer::{Layer, Pixel};

use crate::draw::render::{self, RenderOptions};
use crate::draw::{DirtyTracker, SelectionPath};
use crate::util::{Point, Rect};
use cairo::{Format, ImageSurface};
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Editor state a tool is allowed to touch.
pub trait LayerHost {
    /// Layer that receives edits.
    fn current_layer(&self) -> &Layer;

    /// Current selection outline in canvas coordinates.
    fn selection_path(&self) -> &SelectionPath;

    /// Replaces the selection outline.
    fn set_selection_path(&mut self, path: SelectionPath);

    /// Creates a fresh, transparent selection layer the size of the canvas,
    /// replacing any existing one.
    fn create_selection_layer(&mut self) -> Result<(), DocumentError>;

    fn selection_layer(&self) -> Option<&Layer>;

    fn selection_layer_mut(&mut self) -> Option<&mut Layer>;

    /// Whether the selection layer is composited above the current layer.
    fn show_selection_layer(&self) -> bool;

    fn set_show_selection_layer(&mut self, show: bool);

    /// Drops the selection layer and hides it.
    fn destroy_selection_layer(&mut self);

    /// Requests a repaint of `region`, or of the whole canvas when `None`.
    fn invalidate(&mut self, region: Option<Rect>);
}

/// An image made of layers plus the editing state tools operate on.
pub struct Document {
    width: i32,
    height: i32,
    layers: Vec<Layer>,
    current_layer: usize,
    selection_layer: Option<Layer>,
    show_selection_layer: bool,
    selection_path: SelectionPath,
    dirty: DirtyTracker,
}

impl Document {
    /// Creates a document with a single transparent layer and everything selected.
    pub fn new(width: i32, height: i32) -> Result<Self, DocumentError> {
        if width <= 0 || height <= 0 {
            return Err(DocumentError::InvalidSize { width, height });
        }
        let background = Layer::new("Background", width, height)?;
        Ok(Self::with_layer(background))
    }

    fn with_layer(layer: Layer) -> Self {
        let width = layer.width();
        let height = layer.height();
        Self {
            width,
            height,
            layers: vec![layer],
            current_layer: 0,
            selection_layer: None,
            show_selection_layer: false,
            selection_path: full_canvas(width, height),
            dirty: DirtyTracker::new(),
        }
    }

    /// Loads a PNG as a single-layer document.
    ///
    /// Images without alpha are converted to ARGB32 so every layer shares one format.
    pub fn from_png(path: &Path) -> Result<Self, DocumentError> {
        let mut file = File::open(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded =
            ImageSurface::create_from_png(&mut file).map_err(|source| DocumentError::Png {
                path: path.to_path_buf(),
                source,
            })?;

        let (width, height) = (loaded.width(), loaded.height());
        if width <= 0 || height <= 0 {
            return Err(DocumentError::InvalidSize { width, height });
        }

        let surface = if loaded.format() == Format::ARgb32 {
            loaded
        } else {
            debug!("Converting {:?} image to ARGB32", loaded.format());
            let converted = ImageSurface::create(Format::ARgb32, width, height)?;
            let ctx = cairo::Context::new(&converted)?;
            ctx.set_source_surface(&loaded, 0.0, 0.0)?;
            ctx.paint()?;
            drop(ctx);
            converted
        };

        info!("Loaded {}x{} image from {}", width, height, path.display());
        Ok(Self::with_layer(Layer::from_surface("Background", surface)))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Canvas-space point at the centre of the document.
    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn current_layer_index(&self) -> usize {
        self.current_layer
    }

    /// Adds a transparent layer above the current one and makes it current.
    pub fn add_layer(&mut self, name: impl Into<String>) -> Result<usize, DocumentError> {
        let layer = Layer::new(name, self.width, self.height)?;
        let index = self.current_layer + 1;
        self.layers.insert(index, layer);
        self.current_layer = index;
        self.dirty.mark_full();
        Ok(index)
    }

    pub fn set_current_layer(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.layers.len() {
            return Err(DocumentError::InvalidLayerIndex(index));
        }
        self.current_layer = index;
        Ok(())
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, DocumentError> {
        self.layers
            .get_mut(index)
            .ok_or(DocumentError::InvalidLayerIndex(index))
    }

    /// Selects an axis-aligned rectangle.
    pub fn select_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.replace_selection(SelectionPath::rectangle(x, y, width, height));
    }

    /// Selects the ellipse inscribed in the given box.
    pub fn select_ellipse(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.replace_selection(SelectionPath::ellipse(x, y, width, height));
    }

    /// Selects the whole canvas.
    pub fn reset_selection(&mut self) {
        self.replace_selection(full_canvas(self.width, self.height));
    }

    fn replace_selection(&mut self, path: SelectionPath) {
        self.selection_path = path;
        self.dirty.mark_full();
    }

    /// Drains pending repaint regions.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.dirty.take_regions(self.width, self.height)
    }

    pub fn has_pending_damage(&self) -> bool {
        !self.dirty.is_clean()
    }

    /// Composites the document into a new ARGB32 surface.
    ///
    /// Visible layers are painted bottom to top. The selection layer, when shown,
    /// sits directly above the current layer.
    pub fn flatten(&self, options: &RenderOptions) -> Result<ImageSurface, DocumentError> {
        let surface = ImageSurface::create(Format::ARgb32, self.width, self.height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            render::render_background(&ctx, options.background)?;

            for (index, layer) in self.layers.iter().enumerate() {
                if !layer.is_hidden() {
                    render::render_layer(&ctx, layer, options.snap)?;
                }
                if index == self.current_layer && self.show_selection_layer {
                    if let Some(floating) = &self.selection_layer {
                        render::render_layer(&ctx, floating, options.snap)?;
                    }
                }
            }

            if let Some(style) = &options.outline {
                render::render_selection_outline(&ctx, &self.selection_path, style)?;
            }
        }
        surface.flush();
        Ok(surface)
    }

    /// Flattens the document and writes it as PNG.
    pub fn save_png(&self, path: &Path, options: &RenderOptions) -> Result<(), DocumentError> {
        let surface = self.flatten(options)?;
        let mut file = File::create(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        surface
            .write_to_png(&mut file)
            .map_err(|source| DocumentError::Png {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl LayerHost for Document {
    fn current_layer(&self) -> &Layer {
        &self.layers[self.current_layer]
    }

    fn selection_path(&self) -> &SelectionPath {
        &self.selection_path
    }

    fn set_selection_path(&mut self, path: SelectionPath) {
        self.selection_path = path;
    }

    fn create_selection_layer(&mut self) -> Result<(), DocumentError> {
        let layer = Layer::new("Selection Layer", self.width, self.height)?;
        if self.selection_layer.replace(layer).is_some() {
            debug!("Replaced existing selection layer");
        }
        Ok(())
    }

    fn selection_layer(&self) -> Option<&Layer> {
        self.selection_layer.as_ref()
    }

    fn selection_layer_mut(&mut self) -> Option<&mut Layer> {
        self.selection_layer.as_mut()
    }

    fn show_selection_layer(&self) -> bool {
        self.show_selection_layer
    }

    fn set_show_selection_layer(&mut self, show: bool) {
        self.show_selection_layer = show;
    }

    fn destroy_selection_layer(&mut self) {
        self.selection_layer = None;
        self.show_selection_layer = false;
    }

    fn invalidate(&mut self, region: Option<Rect>) {
        match region {
            Some(rect) => self.dirty.mark_rect(rect),
            None => self.dirty.mark_full(),
        }
    }
}

fn full_canvas(width: i32, height: i32) -> SelectionPath {
    SelectionPath::rectangle(0.0, 0.0, width as f64, height as f64)
}
