//! Software rasterization with tiny-skia.

use mathink_core::{LineCap, LineJoin, PathCommand, Point, StrokePath};
use tiny_skia::{
    Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use super::RasterBackend;
use crate::{ImageFormat, RenderError, RenderResult};

/// Largest surface, in pixels, the backend will allocate.
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// CPU rasterizer backed by tiny-skia.
#[derive(Debug, Clone, Copy)]
pub struct SkiaBackend {
    anti_alias: bool,
}

impl SkiaBackend {
    /// Create an anti-aliased backend.
    #[must_use]
    pub fn new() -> Self {
        Self { anti_alias: true }
    }

    /// Enable or disable anti-aliasing for strokes.
    #[must_use]
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

impl Default for SkiaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterBackend for SkiaBackend {
    type Surface = Pixmap;

    fn begin_frame(
        &self,
        width: u32,
        height: u32,
        background: Option<[u8; 4]>,
    ) -> RenderResult<Pixmap> {
        let (width, height) = (width.max(1), height.max(1));
        if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
            return Err(RenderError::Surface(format!(
                "{width}x{height} pixmap exceeds the {MAX_SURFACE_PIXELS} pixel limit"
            )));
        }
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::Surface(format!("cannot allocate {width}x{height} pixmap"))
        })?;
        if let Some([r, g, b, a]) = background {
            pixmap.fill(Color::from_rgba8(r, g, b, a));
        }
        Ok(pixmap)
    }

    fn stroke_path(
        &self,
        surface: &mut Pixmap,
        path: &StrokePath,
        origin: Point,
        scale: f32,
    ) -> RenderResult<()> {
        let [r, g, b, a] = parse_color(&path.color)?;

        let mut builder = PathBuilder::new();
        for command in &path.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            }
        }
        let Some(skia_path) = builder.finish() else {
            tracing::debug!("Skipping path with no drawable geometry");
            return Ok(());
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.anti_alias;

        let stroke = tiny_skia::Stroke {
            width: path.width,
            line_cap: match path.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match path.line_join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..tiny_skia::Stroke::default()
        };

        surface.stroke_path(
            &skia_path,
            &paint,
            &stroke,
            Transform::from_row(scale, 0.0, 0.0, scale, -origin.x * scale, -origin.y * scale),
            None,
        );
        Ok(())
    }

    fn draw_scaled(
        &self,
        target: &mut Pixmap,
        source: &Pixmap,
        dx: f32,
        dy: f32,
        scale: f32,
    ) -> RenderResult<()> {
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        target.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(scale, 0.0, 0.0, scale, dx, dy),
            None,
        );
        Ok(())
    }

    fn encode(&self, surface: &Pixmap, format: ImageFormat, quality: u8) -> RenderResult<Vec<u8>> {
        match format {
            ImageFormat::Png => surface
                .encode_png()
                .map_err(|e| RenderError::Encoding(format!("PNG encoding failed: {e}"))),
            ImageFormat::Jpeg => encode_jpeg(surface, quality),
        }
    }
}

/// Parse a CSS color string into RGBA bytes.
///
/// # Errors
///
/// Returns [`RenderError::InvalidColor`] if the string is not a CSS color.
pub fn parse_color(color: &str) -> RenderResult<[u8; 4]> {
    csscolorparser::parse(color)
        .map(|c| c.to_rgba8())
        .map_err(|e| RenderError::InvalidColor {
            color: color.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(feature = "images")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> RenderResult<Vec<u8>> {
    use image::ImageEncoder;

    let (width, height) = (pixmap.width(), pixmap.height());
    // Composite over white; JPEG has no alpha channel.
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for pixel in pixmap.data().chunks_exact(4) {
        let inv = 255 - u16::from(pixel[3]);
        // Pixmap data is premultiplied, so adding the uncovered share of white
        // is enough.
        for channel in &pixel[..3] {
            rgb_data.push((u16::from(*channel) + inv).min(255) as u8);
        }
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .write_image(&rgb_data, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encoding(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(not(feature = "images"))]
fn encode_jpeg(_pixmap: &Pixmap, _quality: u8) -> RenderResult<Vec<u8>> {
    Err(RenderError::Encoding(
        "JPEG encoding requires the `images` feature".to_string(),
    ))
}
