//! Budgeted compression WASM bindings.
//!
//! All functions return `undefined` when the budget cannot be met (for example
//! PNG output that is larger than the budget). Errors are reserved for bad
//! arguments and undecodable input.
//!
//! # Functions
//!
//! - [`resize_and_compress`] - Decode, bound dimensions, compress to budget
//! - [`compress_only`] - Decode and compress to budget at original size
//! - [`compress_image`] - Compress an already decoded image
//! - [`compress_with_options`] - Decode and compress with a full options object
//!
//! # Example
//!
//! ```typescript
//! import { resize_and_compress } from '@sizefit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! // 0 = JPEG, 1 = PNG; budget in MB; larger side at most 2048px
//! const jpeg = resize_and_compress(bytes, 0, 2.0, 2048);
//! if (jpeg === undefined) {
//!   console.warn('Could not fit the budget');
//! }
//! ```

use crate::types::{format_from_u8, limits, JsRasterImage};
use sizefit_core::{compress_bytes, CompressOptions, EncodedArtifact, SizeBudget};
use wasm_bindgen::prelude::*;

/// Decode `bytes`, downsample to `max_dimension`, and compress to `target_mb`.
///
/// # Arguments
///
/// * `bytes` - Encoded JPEG or PNG file
/// * `format` - 0 = JPEG (quality search), 1 = PNG (accept or reject)
/// * `target_mb` - Budget in megabytes (1 MB = 1024 * 1024 bytes)
/// * `max_dimension` - Bound for the larger side in pixels (2048 is typical)
#[wasm_bindgen]
pub fn resize_and_compress(
    bytes: &[u8],
    format: u8,
    target_mb: f64,
    max_dimension: f64,
) -> Result<Option<Vec<u8>>, JsValue> {
    run_bytes(bytes, format, target_mb, Some(max_dimension)).map_err(|e| JsValue::from_str(&e))
}

/// Decode `bytes` and compress to `target_mb` without changing dimensions.
#[wasm_bindgen]
pub fn compress_only(bytes: &[u8], format: u8, target_mb: f64) -> Result<Option<Vec<u8>>, JsValue> {
    run_bytes(bytes, format, target_mb, None).map_err(|e| JsValue::from_str(&e))
}

/// Compress an already decoded image.
///
/// Pass `max_dimension` to downsample first, or omit it to keep the size.
#[wasm_bindgen]
pub fn compress_image(
    image: &JsRasterImage,
    format: u8,
    target_mb: f64,
    max_dimension: Option<f64>,
) -> Result<Option<Vec<u8>>, JsValue> {
    run_image(image, format, target_mb, max_dimension).map_err(|e| JsValue::from_str(&e))
}

/// Decode and compress using a `CompressOptions` object.
///
/// ```typescript
/// const out = compress_with_options(bytes, 0, 1.5, {
///   max_dimension: 1024,
///   filter: 'Lanczos3',
///   search: { tolerance: 0.02, min_quality: 0.1, over_budget: 'Absent' },
/// });
/// ```
#[wasm_bindgen]
pub fn compress_with_options(
    bytes: &[u8],
    format: u8,
    target_mb: f64,
    options: JsValue,
) -> Result<Option<Vec<u8>>, JsValue> {
    let options: CompressOptions = if options.is_undefined() || options.is_null() {
        CompressOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
    };
    run_with_options(bytes, format, target_mb, &options).map_err(|e| JsValue::from_str(&e))
}

fn run_bytes(
    bytes: &[u8],
    format: u8,
    target_mb: f64,
    max_dimension: Option<f64>,
) -> Result<Option<Vec<u8>>, String> {
    let (budget, max) = limits(target_mb, max_dimension).map_err(|e| e.to_string())?;
    let options = CompressOptions {
        max_dimension: max,
        ..CompressOptions::default()
    };
    encode_bytes(bytes, format, budget, &options)
}

fn run_with_options(
    bytes: &[u8],
    format: u8,
    target_mb: f64,
    options: &CompressOptions,
) -> Result<Option<Vec<u8>>, String> {
    let (budget, _) = limits(target_mb, None).map_err(|e| e.to_string())?;
    encode_bytes(bytes, format, budget, options)
}

fn encode_bytes(
    bytes: &[u8],
    format: u8,
    budget: SizeBudget,
    options: &CompressOptions,
) -> Result<Option<Vec<u8>>, String> {
    let format = format_from_u8(format)?;
    compress_bytes(bytes, format, budget, options)
        .map(|artifact| artifact.map(EncodedArtifact::into_bytes))
        .map_err(|e| e.to_string())
}

fn run_image(
    image: &JsRasterImage,
    format: u8,
    target_mb: f64,
    max_dimension: Option<f64>,
) -> Result<Option<Vec<u8>>, String> {
    let format = format_from_u8(format)?;
    let (budget, max) = limits(target_mb, max_dimension).map_err(|e| e.to_string())?;
    let compressor = CompressOptions::default().compressor();

    let artifact = match max {
        Some(max) => compressor.resize_and_compress(image.raster(), format, budget, max),
        None => compressor.compress_only(image.raster(), format, budget),
    };
    Ok(artifact.map(EncodedArtifact::into_bytes))
}
