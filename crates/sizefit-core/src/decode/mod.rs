//! Image decoding and resampling.
//!
//! This module provides:
//! - Decoding JPEG/PNG bytes into packed RGB [`RasterImage`]s
//! - EXIF orientation correction
//! - Exact-size resampling used by the downsampler
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod load;
mod render;
mod types;

pub use load::{decode_image, decode_image_no_orientation, get_orientation};
pub use render::render_at_size;
pub use types::{DecodeError, FilterType, Orientation, RasterImage};
