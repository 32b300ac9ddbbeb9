//! Codec backend trait.
//!
//! The engine never touches pixels itself. Everything it needs from a codec
//! goes through [`ImageBackend`]: resample to a size, encode lossy at a
//! quality, encode lossless. [`RustBackend`] is the production
//! implementation on top of the `image` crate; tests substitute a synthetic
//! backend with a known size curve.

use crate::decode::{render_at_size, DecodeError, FilterType, RasterImage};
use crate::encode::{encode_jpeg, encode_png, EncodeError};

/// Operations the compression engine delegates to a codec.
pub trait ImageBackend {
    /// Resample `image` to exactly `width` x `height`.
    fn render_at_size(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError>;

    /// Encode with a normalized quality in `[0, 1]`.
    ///
    /// Output size must be non-decreasing in `quality` for the budget search
    /// to converge.
    fn encode_lossy(&self, image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError>;

    fn encode_lossless(&self, image: &RasterImage) -> Result<Vec<u8>, EncodeError>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for &B {
    fn render_at_size(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError> {
        (**self).render_at_size(image, width, height)
    }

    fn encode_lossy(&self, image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode_lossy(image, quality)
    }

    fn encode_lossless(&self, image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
        (**self).encode_lossless(image)
    }
}

/// JPEG/PNG backend built on the `image` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RustBackend {
    filter: FilterType,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl ImageBackend for RustBackend {
    fn render_at_size(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError> {
        render_at_size(image, width, height, self.filter)
    }

    fn encode_lossy(&self, image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(image, quality)
    }

    fn encode_lossless(&self, image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
        encode_png(image)
    }
}
