//! Sizefit WASM - WebAssembly bindings for sizefit
//!
//! This crate exposes the sizefit-core compression engine to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding and downsampling bindings
//! - `compress` - Budgeted JPEG/PNG compression bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { resize_and_compress } from '@sizefit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const jpeg = resize_and_compress(bytes, 0, 2.0, 2048);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod decode;
mod types;

pub use compress::{compress_image, compress_only, compress_with_options, resize_and_compress};
pub use decode::{decode_image, downsample};
pub use types::JsRasterImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
