//! Pixel resampling.
//!
//! This is the rendering primitive the downsampler delegates to. It fixes
//! nothing about *which* size to produce; callers decide that.

use super::{DecodeError, FilterType, RasterImage};

/// Resample an image to exact dimensions.
///
/// Returns a clone when the requested size equals the current size.
///
/// # Errors
///
/// Returns `DecodeError::InvalidSize` if either requested side is zero, and
/// `DecodeError::PixelBufferMismatch` if the source buffer does not match its
/// stated dimensions.
pub fn render_at_size(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidSize { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or(DecodeError::PixelBufferMismatch {
            expected: image.width as usize * image.height as usize * 3,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}
