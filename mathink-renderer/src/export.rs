//! Drawing export to a fixed-size image.
//!
//! The drawing is cropped to its bounding box, scaled uniformly to fit the
//! output and centered on a solid background, so the recognition service
//! always receives the same resolution no matter where or how large the user
//! drew.

use mathink_core::{Bounds, Drawing, Point};
use serde::Serialize;

use crate::backend::{RasterBackend, SkiaBackend};
use crate::encoded::{EncodedImage, ImageFormat};
use crate::error::{RenderError, RenderResult};

/// Extent substituted for a zero-width or zero-height bounding box.
pub const MIN_EXTENT: f32 = 1.0;

/// Longest side of the crop surface in pixels. Larger drawings are
/// rasterized at reduced resolution.
pub const MAX_SOURCE_SIDE: f32 = 4096.0;

/// Configuration for drawing export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels (default: 400).
    pub width: u32,
    /// Output height in pixels (default: 400).
    pub height: u32,
    /// Background color as RGBA bytes (default: opaque white).
    pub background: [u8; 4],
    /// Output encoding (default: PNG).
    pub format: ImageFormat,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: [255, 255, 255, 255],
            format: ImageFormat::Png,
            jpeg_quality: 85,
        }
    }
}

/// Non-fatal conditions met during export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportWarning {
    /// The bounding box had zero width or height; [`MIN_EXTENT`] was used.
    DegenerateBounds {
        /// Measured width before substitution.
        width: f32,
        /// Measured height before substitution.
        height: f32,
    },
}

impl std::fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateBounds { width, height } => write!(
                f,
                "degenerate drawing bounds {width}x{height}, using minimum extent {MIN_EXTENT}"
            ),
        }
    }
}

/// Placement of the cropped drawing inside the output image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitLayout {
    /// Canvas point mapped to the crop surface's `(0, 0)`.
    pub origin: Point,
    /// Crop width in canvas units (at least [`MIN_EXTENT`]).
    pub source_width: f32,
    /// Crop height in canvas units (at least [`MIN_EXTENT`]).
    pub source_height: f32,
    /// Uniform scale from canvas units to output pixels.
    pub scale: f32,
    /// Canvas units to crop-surface pixels; 1 unless the crop would exceed
    /// [`MAX_SOURCE_SIDE`].
    pub raster_scale: f32,
    /// Horizontal padding on each side.
    pub offset_x: f32,
    /// Vertical padding on each side.
    pub offset_y: f32,
}

impl FitLayout {
    /// Fit `bounds` into an `out_width` x `out_height` image, preserving
    /// aspect ratio and centering along the shorter axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(
        bounds: &Bounds,
        out_width: u32,
        out_height: u32,
    ) -> (Self, Option<ExportWarning>) {
        let (measured_w, measured_h) = (bounds.width(), bounds.height());
        let warning = bounds
            .is_degenerate()
            .then_some(ExportWarning::DegenerateBounds {
                width: measured_w,
                height: measured_h,
            });

        let source_width = measured_w.max(MIN_EXTENT);
        let source_height = measured_h.max(MIN_EXTENT);
        let (out_w, out_h) = (out_width as f32, out_height as f32);

        let scale = (out_w / source_width).min(out_h / source_height);
        let raster_scale = (MAX_SOURCE_SIDE / source_width.max(source_height)).min(1.0);
        let layout = Self {
            origin: bounds.origin(),
            source_width,
            source_height,
            scale,
            raster_scale,
            offset_x: (out_w - source_width * scale) / 2.0,
            offset_y: (out_h - source_height * scale) / 2.0,
        };
        (layout, warning)
    }

    /// Width of the drawn content in the output.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.source_width * self.scale
    }

    /// Height of the drawn content in the output.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.source_height * self.scale
    }

    /// Crop surface size in whole pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn source_pixels(&self) -> (u32, u32) {
        let side = |extent: f32| {
            ((extent * self.raster_scale).ceil() as u32).clamp(1, MAX_SOURCE_SIDE as u32)
        };
        (side(self.source_width), side(self.source_height))
    }

    /// Scale applied when drawing the crop surface onto the output.
    #[must_use]
    pub fn blit_scale(&self) -> f32 {
        self.scale / self.raster_scale
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// The encoded output.
    pub image: EncodedImage,
    /// How the drawing was placed.
    pub layout: FitLayout,
    /// Non-fatal conditions met while exporting.
    pub warnings: Vec<ExportWarning>,
}

/// Exports a [`Drawing`] to a fixed-size image.
pub struct DrawingExporter<B = SkiaBackend> {
    config: ExportConfig,
    backend: B,
}

impl DrawingExporter<SkiaBackend> {
    /// Create a new exporter using the tiny-skia backend.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self::with_backend(config, SkiaBackend::new())
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }
}

impl<B: RasterBackend> DrawingExporter<B> {
    /// Create an exporter that rasterizes with `backend`.
    #[must_use]
    pub fn with_backend(config: ExportConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Get the export configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Output dimensions (width, height) in pixels.
    #[must_use]
    pub fn output_dimensions(&self) -> (u32, u32) {
        (self.config.width.max(1), self.config.height.max(1))
    }

    /// Compute the layout the drawing would be exported with.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyInput`] if the drawing has no strokes.
    pub fn layout(
        &self,
        drawing: &Drawing,
    ) -> RenderResult<(FitLayout, Option<ExportWarning>)> {
        let bounds = drawing.bounds().ok_or(RenderError::EmptyInput)?;
        let (out_w, out_h) = self.output_dimensions();
        Ok(FitLayout::compute(&bounds, out_w, out_h))
    }

    /// Export the drawing.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EmptyInput`] for a drawing without strokes,
    /// [`RenderError::Encoding`] if the output cannot be encoded, or a backend
    /// error if rasterization fails.
    pub fn export(&self, drawing: &Drawing) -> RenderResult<ExportedImage> {
        let (layout, warning) = self.layout(drawing)?;
        if let Some(warning) = &warning {
            tracing::warn!("{warning}");
        }

        let (src_w, src_h) = layout.source_pixels();
        let mut source = self.backend.begin_frame(src_w, src_h, None)?;
        for path in drawing.paths() {
            self.backend
                .stroke_path(&mut source, &path, layout.origin, layout.raster_scale)?;
        }

        let (out_w, out_h) = self.output_dimensions();
        let mut output = self
            .backend
            .begin_frame(out_w, out_h, Some(self.config.background))?;
        self.backend.draw_scaled(
            &mut output,
            &source,
            layout.offset_x,
            layout.offset_y,
            layout.blit_scale(),
        )?;

        let bytes = self
            .backend
            .encode(&output, self.config.format, self.config.jpeg_quality)?;

        tracing::debug!(
            "Exported {} strokes: crop {src_w}x{src_h}, scale {:.3}, offset ({:.1}, {:.1}), \
             {} bytes",
            drawing.len(),
            layout.scale,
            layout.offset_x,
            layout.offset_y,
            bytes.len()
        );

        Ok(ExportedImage {
            image: EncodedImage {
                bytes,
                width: out_w,
                height: out_h,
                format: self.config.format,
            },
            layout,
            warnings: warning.into_iter().collect(),
        })
    }
}
