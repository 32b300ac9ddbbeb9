//! The size-targeting compression engine.
//!
//! [`Compressor`] composes the downsampler with the per-format budget
//! policies:
//!
//! - **Lossy**: bisection over encoder quality ([`crate::search`]).
//! - **Lossless**: encode once; keep it if it fits, otherwise nothing.
//!
//! The engine holds no mutable state. A `Compressor` can be built per call
//! or shared, and is `Send + Sync` whenever its backend is.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::{Compressor, MaxDimension, SizeBudget, TargetFormat};
//!
//! let compressor = Compressor::new();
//! let budget = SizeBudget::from_megabytes(2.0)?;
//! if let Some(artifact) =
//!     compressor.resize_and_compress(&image, TargetFormat::Lossy, budget, MaxDimension::default())
//! {
//!     std::fs::write("out.jpg", artifact.as_bytes())?;
//! }
//! ```

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::artifact::{EncodedArtifact, TargetFormat};
use crate::backend::{ImageBackend, RustBackend};
use crate::budget::{MaxDimension, SizeBudget};
use crate::decode::RasterImage;
use crate::downsample::downsample;
use crate::search::{search_lossy, SearchParams};

/// Stateless compression engine over an [`ImageBackend`].
#[derive(Debug, Clone, Default)]
pub struct Compressor<B = RustBackend> {
    backend: B,
    search: SearchParams,
}

impl Compressor<RustBackend> {
    /// Engine on the `image`-crate backend with default search parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: ImageBackend> Compressor<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            search: SearchParams::default(),
        }
    }

    pub fn with_search(mut self, search: SearchParams) -> Self {
        self.search = search;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn search_params(&self) -> SearchParams {
        self.search
    }

    /// Bound the larger side of `image` to `max`. Never upscales, never fails.
    pub fn downsample<'a>(&self, image: &'a RasterImage, max: MaxDimension) -> Cow<'a, RasterImage> {
        downsample(&self.backend, image, max)
    }

    /// Highest-quality lossy encode that fits `budget`.
    ///
    /// When no quality fits, the result follows the configured
    /// [`OverBudgetPolicy`](crate::search::OverBudgetPolicy).
    pub fn encode_lossy_within_budget(
        &self,
        image: &RasterImage,
        budget: SizeBudget,
    ) -> Option<EncodedArtifact> {
        search_lossy(&self.backend, image, budget, self.search)
    }

    /// Lossless encode if it fits `budget`, otherwise `None`.
    pub fn encode_lossless_within_budget(
        &self,
        image: &RasterImage,
        budget: SizeBudget,
    ) -> Option<EncodedArtifact> {
        let bytes = match self.backend.encode_lossless(image) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "lossless encode failed");
                return None;
            }
        };

        if budget.admits(bytes.len()) {
            Some(EncodedArtifact::lossless(bytes))
        } else {
            debug!(
                bytes = bytes.len(),
                budget_mb = budget.megabytes(),
                "lossless output exceeds budget"
            );
            None
        }
    }

    /// Dispatch to the budget policy for `format`.
    pub fn encode_within_budget(
        &self,
        image: &RasterImage,
        format: TargetFormat,
        budget: SizeBudget,
    ) -> Option<EncodedArtifact> {
        match format {
            TargetFormat::Lossy => self.encode_lossy_within_budget(image, budget),
            TargetFormat::Lossless => self.encode_lossless_within_budget(image, budget),
        }
    }

    /// Downsample to `max`, then encode within `budget`.
    pub fn resize_and_compress(
        &self,
        image: &RasterImage,
        format: TargetFormat,
        budget: SizeBudget,
        max: MaxDimension,
    ) -> Option<EncodedArtifact> {
        let resized = self.downsample(image, max);
        self.encode_within_budget(&resized, format, budget)
    }

    /// Encode within `budget` at the original dimensions.
    pub fn compress_only(
        &self,
        image: &RasterImage,
        format: TargetFormat,
        budget: SizeBudget,
    ) -> Option<EncodedArtifact> {
        self.encode_within_budget(image, format, budget)
    }
}
