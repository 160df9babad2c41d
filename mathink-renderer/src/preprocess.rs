//! Camera photo preprocessing before recognition.
//!
//! Photos are taken with the equation roughly centered in the viewfinder, so
//! only a centered square is kept and then downscaled.

use std::io::Cursor;

use image::imageops::FilterType;
use image::GenericImageView;

use crate::encoded::{EncodedImage, ImageFormat};
use crate::error::{RenderError, RenderResult};

/// Configuration for photo preprocessing.
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Side of the centered square crop as a fraction of the photo width.
    pub crop_fraction: f32,
    /// Width of the output image in pixels.
    pub target_width: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            crop_fraction: 0.52,
            target_width: 500,
        }
    }
}

/// Crop a photo to its centered square and resize it, returning a PNG.
///
/// The crop side is clamped to the photo's shorter dimension.
///
/// # Errors
///
/// Returns [`RenderError::Resource`] if the photo cannot be decoded and
/// [`RenderError::Encoding`] if the result cannot be encoded.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn preprocess_photo(photo: &[u8], config: &PreprocessConfig) -> RenderResult<EncodedImage> {
    let img = image::load_from_memory(photo)
        .map_err(|e| RenderError::Resource(format!("failed to decode photo: {e}")))?;
    let (width, height) = img.dimensions();

    let side = ((width as f32 * config.crop_fraction).round() as u32)
        .clamp(1, width.min(height).max(1));
    let x = (width - side) / 2;
    let y = (height - side) / 2;

    let target = config.target_width.max(1);
    let processed = img
        .crop_imm(x, y, side, side)
        .resize_exact(target, target, FilterType::Triangle);

    let mut buf = Cursor::new(Vec::new());
    processed
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| RenderError::Encoding(format!("PNG encoding failed: {e}")))?;

    tracing::debug!(
        "Preprocessed {width}x{height} photo: crop {side}px at ({x}, {y}), resized to {target}px"
    );

    Ok(EncodedImage {
        bytes: buf.into_inner(),
        width: target,
        height: target,
        format: ImageFormat::Png,
    })
}

/// Wrap an already encoded PNG or JPEG file for upload as-is.
///
/// # Errors
///
/// Returns [`RenderError::Resource`] if the bytes are not a readable PNG or
/// JPEG.
pub fn load_encoded(bytes: Vec<u8>) -> RenderResult<EncodedImage> {
    let format = ImageFormat::from_magic_bytes(&bytes).ok_or_else(|| {
        RenderError::Resource("unsupported image format (expected PNG or JPEG)".to_string())
    })?;
    let (width, height) = image::ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .and_then(|reader| reader.into_dimensions().map_err(std::io::Error::other))
        .map_err(|e| RenderError::Resource(format!("failed to read image header: {e}")))?;
    Ok(EncodedImage {
        bytes,
        width,
        height,
        format,
    })
}
