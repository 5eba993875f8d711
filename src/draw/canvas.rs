//! Raster drawing surface backed by a Cairo image surface.

use super::color::Color;
use super::render;
use super::stamp::Stamp;
use crate::history::Snapshot;
use thiserror::Error;

/// Errors raised by the raster canvas.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encode/decode failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Canvas pixels are borrowed elsewhere")]
    Borrowed,
}

/// The drawing surface: single source of truth for pixel content.
///
/// Every operation builds a short-lived Cairo context and drops it before
/// returning, so the surface is never shared when its pixels are read back.
pub struct Canvas {
    surface: cairo::ImageSurface,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: i32, height: i32) -> Result<Self, CanvasError> {
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    fn context(&self) -> Result<cairo::Context, CanvasError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    /// Erases every pixel back to transparent.
    pub fn clear(&mut self) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Strokes one freehand segment.
    pub fn draw_segment(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
        thick: f64,
    ) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        render::render_segment(&ctx, from, to, color, thick);
        ctx.status()?;
        Ok(())
    }

    /// Rasterizes a click-brush stamp.
    pub fn stamp(&mut self, stamp: &Stamp) -> Result<(), CanvasError> {
        let ctx = self.context()?;
        render::render_stamp(&ctx, stamp);
        ctx.status()?;
        Ok(())
    }

    /// Serializes the full pixel content as a PNG snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, CanvasError> {
        self.surface.flush();
        let mut png = Vec::new();
        self.surface.write_to_png(&mut png)?;
        Ok(Snapshot::new(png, self.width(), self.height()))
    }

    /// Replaces the canvas content with a decoded snapshot.
    ///
    /// The snapshot is decoded before anything is touched; on failure the
    /// canvas is left unchanged.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), CanvasError> {
        let image = cairo::ImageSurface::create_from_png(&mut snapshot.png())?;
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&image, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Encodes the canvas as PNG, optionally flattened onto a background color.
    pub fn to_png(&self, background: Option<Color>) -> Result<Vec<u8>, CanvasError> {
        let Some(background) = background else {
            return Ok(self.snapshot()?.into_png());
        };

        self.surface.flush();
        let flat = cairo::ImageSurface::create(cairo::Format::ARgb32, self.width(), self.height())?;
        {
            let ctx = cairo::Context::new(&flat)?;
            render::render_background(&ctx, background);
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        let mut png = Vec::new();
        flat.write_to_png(&mut png)?;
        Ok(png)
    }

    /// Returns the premultiplied `[r, g, b, a]` value of one pixel.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let stride = self.surface.stride() as usize;
        self.surface.flush();
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        // ARGB32 is stored native-endian as a u32
        let value = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Some([
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
            (value >> 24) as u8,
        ])
    }

    /// True when no pixel has been painted.
    pub fn is_blank(&mut self) -> Result<bool, CanvasError> {
        self.surface.flush();
        let data = self.surface.data().map_err(|_| CanvasError::Borrowed)?;
        Ok(data.iter().all(|byte| *byte == 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED, WHITE};

    #[test]
    fn new_canvas_is_blank() {
        let mut canvas = Canvas::new(64, 48).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (64, 48));
        assert!(canvas.is_blank().unwrap());
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CanvasError::InvalidSize { .. })
        ));
    }

    #[test]
    fn segment_paints_pixels_along_its_path() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.draw_segment((10, 50), (90, 50), RED, 6.0).unwrap();

        let [r, g, b, a] = canvas.pixel(50, 50).unwrap();
        assert_eq!(a, 255);
        assert_eq!((r, g, b), (255, 0, 0));
        assert_eq!(canvas.pixel(50, 10).unwrap()[3], 0);
    }

    #[test]
    fn clear_erases_everything() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.stamp(&Stamp::circle(20, 20, 20.0, BLACK, 4.0)).unwrap();
        assert!(!canvas.is_blank().unwrap());

        canvas.clear().unwrap();
        assert!(canvas.is_blank().unwrap());
    }

    #[test]
    fn snapshot_restore_brings_back_pixels() {
        let mut canvas = Canvas::new(60, 60).unwrap();
        canvas.draw_segment((5, 30), (55, 30), BLACK, 8.0).unwrap();
        let snapshot = canvas.snapshot().unwrap();

        canvas.clear().unwrap();
        assert!(canvas.is_blank().unwrap());

        canvas.restore(&snapshot).unwrap();
        assert_eq!(canvas.pixel(30, 30).unwrap()[3], 255);
        assert_eq!(canvas.pixel(30, 5).unwrap()[3], 0);
    }

    #[test]
    fn restore_rejects_corrupt_snapshot_without_touching_pixels() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        canvas.draw_segment((0, 15), (30, 15), BLACK, 6.0).unwrap();

        let bogus = Snapshot::new(b"not a png".to_vec(), 30, 30);
        assert!(canvas.restore(&bogus).is_err());
        assert_eq!(canvas.pixel(15, 15).unwrap()[3], 255);
    }

    #[test]
    fn flattened_export_fills_background() {
        let canvas = Canvas::new(16, 16).unwrap();
        let png = canvas.to_png(Some(WHITE)).unwrap();
        let decoded = cairo::ImageSurface::create_from_png(&mut png.as_slice()).unwrap();
        let mut restored = Canvas { surface: decoded };
        let [r, g, b, _] = restored.pixel(3, 3).unwrap();
        assert_eq!((r, g, b), (255, 255, 255));
    }
}
