//! Sizefit Core - size-targeting image compression
//!
//! This crate shrinks decoded images to fit a byte budget given in megabytes.
//! It bounds pixel dimensions without upscaling, searches JPEG quality for the
//! largest output under budget, and accepts or rejects PNG output in a single
//! pass.

pub mod artifact;
pub mod backend;
pub mod budget;
pub mod compress;
pub mod decode;
pub mod downsample;
pub mod encode;
pub mod search;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use artifact::{EncodedArtifact, TargetFormat};
pub use backend::{ImageBackend, RustBackend};
pub use budget::{BudgetError, MaxDimension, SizeBudget, BYTES_PER_MEGABYTE};
pub use compress::Compressor;
pub use decode::{
    decode_image, decode_image_no_orientation, get_orientation, DecodeError, FilterType,
    Orientation, RasterImage,
};
pub use downsample::{downsample, target_dimensions};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use search::{search_lossy, OverBudgetPolicy, SearchParams};

/// Options for the byte-level pipeline.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// Bound for the larger side; `None` keeps the original dimensions.
    pub max_dimension: Option<MaxDimension>,
    /// Resampling filter used when downsampling.
    pub filter: FilterType,
    /// Lossy search tunables.
    pub search: SearchParams,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_dimension: Some(MaxDimension::default()),
            filter: FilterType::default(),
            search: SearchParams::default(),
        }
    }
}

impl CompressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that skip downsampling entirely.
    pub fn compress_only() -> Self {
        Self {
            max_dimension: None,
            ..Self::default()
        }
    }

    /// Build the engine these options describe.
    pub fn compressor(&self) -> Compressor {
        Compressor::with_backend(RustBackend::with_filter(self.filter)).with_search(self.search)
    }
}

/// Decode `bytes`, then downsample and compress according to `options`.
///
/// # Errors
///
/// Only decoding can fail. Not meeting the budget is `Ok(None)`.
pub fn compress_bytes(
    bytes: &[u8],
    format: TargetFormat,
    budget: SizeBudget,
    options: &CompressOptions,
) -> Result<Option<EncodedArtifact>, DecodeError> {
    let image = decode_image(bytes)?;
    let compressor = options.compressor();

    Ok(match options.max_dimension {
        Some(max) => compressor.resize_and_compress(&image, format, budget, max),
        None => compressor.compress_only(&image, format, budget),
    })
}
