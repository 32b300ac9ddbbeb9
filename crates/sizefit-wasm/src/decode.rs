//! Decoding and downsampling WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG/PNG bytes (EXIF orientation applied)
//! - [`downsample`] - Bound an image's larger side without upscaling
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, downsample } from '@sizefit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const small = downsample(image, 2048, 1); // Bilinear
//! console.log(`${image.width}x${image.height} -> ${small.width}x${small.height}`);
//! ```

use crate::types::JsRasterImage;
use sizefit_core::{decode, Compressor, FilterType, MaxDimension, RasterImage, RustBackend};
use wasm_bindgen::prelude::*;

/// Decode image bytes into RGB pixels.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Shrink an image so neither side exceeds `max_dimension`.
///
/// Images that already fit come back at the same size. A resampling failure
/// also returns the image at its original size.
///
/// # Arguments
///
/// * `image` - The source image
/// * `max_dimension` - Bound for the larger side in pixels
/// * `filter` - 0=Nearest, 1=Bilinear (default), 2=Lanczos3
///
/// # Errors
///
/// Returns an error if `max_dimension` is not a positive number.
#[wasm_bindgen]
pub fn downsample(
    image: &JsRasterImage,
    max_dimension: f64,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    let max = MaxDimension::new(max_dimension).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(JsRasterImage::from_raster(downsample_raster(image, max, filter)))
}

fn downsample_raster(image: &JsRasterImage, max: MaxDimension, filter: u8) -> RasterImage {
    let compressor = Compressor::with_backend(RustBackend::with_filter(filter_from_u8(filter)));
    compressor.downsample(image.raster(), max).into_owned()
}

/// Convert a u8 filter value to the core FilterType. Unknown values mean Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}
