//! Raster layers backed by Cairo image surfaces.

use super::DocumentError;
use crate::util::Point;
use cairo::{Context, Format, ImageSurface};

/// Straight (non-premultiplied) 8-bit RGBA value read back from a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const CLEAR: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Decodes one native-endian premultiplied ARGB32 word.
    fn from_argb32(word: u32) -> Self {
        let a = (word >> 24) as u8;
        if a == 0 {
            return Self::CLEAR;
        }
        let unpremultiply = |c: u32| -> u8 {
            let c = (c & 0xff) * 255 + u32::from(a) / 2;
            (c / u32::from(a)).min(255) as u8
        };
        Self {
            r: unpremultiply(word >> 16),
            g: unpremultiply(word >> 8),
            b: unpremultiply(word),
            a,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.a == 0
    }
}

/// A single raster layer of a document.
///
/// The surface is always ARGB32 and the size of the canvas. `offset` shifts
/// where the surface is composited; regular layers keep it at the origin,
/// the floating selection layer moves it while being dragged.
pub struct Layer {
    name: String,
    surface: ImageSurface,
    offset: Point,
    opacity: f64,
    hidden: bool,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("size", &(self.width(), self.height()))
            .field("offset", &self.offset)
            .field("opacity", &self.opacity)
            .field("hidden", &self.hidden)
            .finish()
    }
}

impl Layer {
    /// Creates a fully transparent layer.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> Result<Self, DocumentError> {
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self::from_surface(name, surface))
    }

    /// Wraps an existing surface. The caller guarantees the ARGB32 format.
    pub fn from_surface(name: impl Into<String>, surface: ImageSurface) -> Self {
        Self {
            name: name.into(),
            surface,
            offset: Point::ORIGIN,
            opacity: 1.0,
            hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Opens a drawing context on the layer surface.
    pub fn context(&self) -> Result<Context, cairo::Error> {
        Context::new(&self.surface)
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Sets the compositing opacity, clamped to 0.0-1.0.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Reads the pixel at `(x, y)` in surface coordinates (offset is ignored).
    pub fn pixel(&self, x: i32, y: i32) -> Result<Pixel, DocumentError> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return Err(DocumentError::PixelOutOfBounds { x, y });
        }

        let stride = self.surface.stride() as usize;
        let index = y as usize * stride + x as usize * 4;
        let mut word = 0u32;
        self.surface.with_data(|data| {
            if let Some(bytes) = data.get(index..index + 4) {
                word = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
        })?;
        Ok(Pixel::from_argb32(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_transparent() {
        let layer = Layer::new("Layer 1", 8, 8).unwrap();
        assert_eq!(layer.pixel(3, 3).unwrap(), Pixel::CLEAR);
        assert_eq!(layer.offset(), Point::ORIGIN);
        assert_eq!(layer.opacity(), 1.0);
    }

    #[test]
    fn pixel_reads_painted_color() {
        let layer = Layer::new("Layer 1", 8, 8).unwrap();
        {
            let ctx = layer.context().unwrap();
            ctx.set_source_rgba(0.0, 0.0, 1.0, 1.0);
            ctx.rectangle(2.0, 2.0, 2.0, 2.0);
            ctx.fill().unwrap();
        }
        assert_eq!(
            layer.pixel(3, 3).unwrap(),
            Pixel {
                r: 0,
                g: 0,
                b: 255,
                a: 255
            }
        );
        assert!(layer.pixel(5, 5).unwrap().is_clear());
    }

    #[test]
    fn pixel_out_of_bounds_is_an_error() {
        let layer = Layer::new("Layer 1", 4, 4).unwrap();
        assert!(matches!(
            layer.pixel(4, 0),
            Err(DocumentError::PixelOutOfBounds { x: 4, y: 0 })
        ));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut layer = Layer::new("Layer 1", 4, 4).unwrap();
        layer.set_opacity(1.7);
        assert_eq!(layer.opacity(), 1.0);
        layer.set_opacity(-0.2);
        assert_eq!(layer.opacity(), 0.0);
    }
}
