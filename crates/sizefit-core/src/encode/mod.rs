//! Image encoding.
//!
//! This module provides:
//! - Lossy JPEG encoding driven by a normalized `[0, 1]` quality
//! - Lossless PNG encoding
//!
//! Both encoders are deterministic: the same image and quality always produce
//! the same bytes, which the budget search relies on.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::decode::RasterImage;
//! use sizefit_core::encode::{encode_jpeg, encode_png};
//!
//! let image = RasterImage::filled(100, 100, [128, 128, 128]);
//! let jpeg = encode_jpeg(&image, 0.9).unwrap();
//! let png = encode_png(&image).unwrap();
//! ```

mod jpeg;
mod png;

pub use jpeg::{encode_jpeg, jpeg_quality};
pub use png::encode_png;

use thiserror::Error;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Validate an image before handing it to a codec.
fn validate(image: &crate::decode::RasterImage) -> Result<(), EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
