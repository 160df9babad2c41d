//! Rasterization backends.
//!
//! The exporter only needs four capabilities from a 2D graphics API: create a
//! surface, stroke a path onto it, draw one surface scaled onto another, and
//! encode a surface. Anything that can do that can back an export.

pub mod skia;

use mathink_core::{Point, StrokePath};

pub use skia::SkiaBackend;

use crate::{ImageFormat, RenderResult};

/// Trait for rasterization backends.
pub trait RasterBackend: Send + Sync {
    /// Offscreen drawing surface.
    type Surface: Send;

    /// Create a `width` x `height` surface, filled with `background` (RGBA) or
    /// left transparent.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated.
    fn begin_frame(
        &self,
        width: u32,
        height: u32,
        background: Option<[u8; 4]>,
    ) -> RenderResult<Self::Surface>;

    /// Stroke `path` onto `surface`, translated so `origin` lands on `(0, 0)`
    /// and then scaled uniformly by `scale` (stroke width included).
    ///
    /// # Errors
    ///
    /// Returns an error if the path's style cannot be applied.
    fn stroke_path(
        &self,
        surface: &mut Self::Surface,
        path: &StrokePath,
        origin: Point,
        scale: f32,
    ) -> RenderResult<()>;

    /// Draw `source` onto `target`, scaled uniformly by `scale` with its
    /// top-left corner at `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn draw_scaled(
        &self,
        target: &mut Self::Surface,
        source: &Self::Surface,
        dx: f32,
        dy: f32,
        scale: f32,
    ) -> RenderResult<()>;

    /// Encode `surface` into `format`. `quality` is used by lossy formats.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported or encoding fails.
    fn encode(&self, surface: &Self::Surface, format: ImageFormat, quality: u8)
        -> RenderResult<Vec<u8>>;
}
