//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core sizefit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use sizefit_core::{BudgetError, MaxDimension, RasterImage, SizeBudget, TargetFormat};
use wasm_bindgen::prelude::*;

/// A decoded RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new JsRasterImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// # Errors
    /// Returns an error if either side is zero or the buffer length is wrong.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterImage, JsValue> {
        RasterImage::try_new(width, height, pixels)
            .map(Self::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// Convert a u8 format value to the core TargetFormat.
///
/// Values:
/// - 0 = Lossy (JPEG)
/// - 1 = Lossless (PNG)
///
/// Any other value is rejected.
pub(crate) fn format_from_u8(value: u8) -> Result<TargetFormat, String> {
    match value {
        0 => Ok(TargetFormat::Lossy),
        1 => Ok(TargetFormat::Lossless),
        other => Err(format!("Unknown target format: {other}")),
    }
}

/// Parse the numeric limits passed from JavaScript.
pub(crate) fn limits(
    target_mb: f64,
    max_dimension: Option<f64>,
) -> Result<(SizeBudget, Option<MaxDimension>), BudgetError> {
    let budget = SizeBudget::from_megabytes(target_mb)?;
    let max = max_dimension.map(MaxDimension::new).transpose()?;
    Ok((budget, max))
}
