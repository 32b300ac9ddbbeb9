//! Quality search for lossy output.
//!
//! Finds the highest quality whose encoded size fits a [`SizeBudget`] by
//! bisection over the normalized quality interval `[0, 1]`:
//!
//! 1. Encode at `q = 1.0`. If it fits, return it with no bisection at all.
//! 2. Otherwise keep `low = 0`, `high = 1` and, while
//!    `high - low > tolerance` and `high > min_quality`, encode at the
//!    midpoint. Too large moves `high` down; fitting records the candidate as
//!    best-known-good and moves `low` up.
//! 3. An encode failure ends the search early with whatever is best so far.
//!
//! The search assumes encoded size is non-decreasing in quality. With the
//! default tolerance of 0.05 it performs at most five midpoint encodes.
//!
//! What comes back when *no* tried quality fits is governed by
//! [`OverBudgetPolicy`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::artifact::EncodedArtifact;
use crate::backend::ImageBackend;
use crate::budget::SizeBudget;
use crate::decode::RasterImage;

/// Smallest interval width the search will accept as a stopping tolerance.
pub const MIN_TOLERANCE: f32 = 1e-4;

/// Result selection when no tried quality meets the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverBudgetPolicy {
    /// Return the full-quality encode even though it is over budget.
    #[default]
    BestEffort,
    /// Return nothing.
    Absent,
    /// Return the smallest encode produced during the search.
    Smallest,
}

/// Tunables for the lossy search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Stop once `high - low` is no larger than this.
    pub tolerance: f32,
    /// Stop once `high` falls to or below this quality.
    pub min_quality: f32,
    pub over_budget: OverBudgetPolicy,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            min_quality: 0.1,
            over_budget: OverBudgetPolicy::BestEffort,
        }
    }
}

impl SearchParams {
    pub fn with_policy(mut self, policy: OverBudgetPolicy) -> Self {
        self.over_budget = policy;
        self
    }

    /// Replace out-of-range values so the loop always terminates.
    ///
    /// Tolerance below [`MIN_TOLERANCE`] (or non-finite) falls back to the
    /// default; min quality is clamped into `[0, 1]`.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let tolerance = if self.tolerance.is_finite() && self.tolerance >= MIN_TOLERANCE {
            self.tolerance
        } else {
            defaults.tolerance
        };
        let min_quality = if self.min_quality.is_finite() {
            self.min_quality.clamp(0.0, 1.0)
        } else {
            defaults.min_quality
        };
        Self {
            tolerance,
            min_quality,
            over_budget: self.over_budget,
        }
    }
}

/// Encode `image` at the highest quality that fits `budget`.
///
/// Returns `None` only when nothing usable was produced: every encode failed,
/// or nothing fit and the policy is [`OverBudgetPolicy::Absent`].
pub fn search_lossy<B: ImageBackend + ?Sized>(
    backend: &B,
    image: &RasterImage,
    budget: SizeBudget,
    params: SearchParams,
) -> Option<EncodedArtifact> {
    let params = params.sanitized();

    let top = match backend.encode_lossy(image, 1.0) {
        Ok(bytes) => {
            let top = EncodedArtifact::lossy(bytes, 1.0);
            if budget.admits(top.len()) {
                debug!(bytes = top.len(), "full quality already within budget");
                return Some(top);
            }
            Some(top)
        }
        Err(e) => {
            warn!(error = %e, "full quality encode failed");
            None
        }
    };

    // Returned when no candidate fits. Released as soon as one does, so
    // besides the current candidate only one of this and the best fit is held.
    let mut fallback = match params.over_budget {
        OverBudgetPolicy::BestEffort | OverBudgetPolicy::Smallest => top,
        OverBudgetPolicy::Absent => None,
    };
    let mut best: Option<EncodedArtifact> = None;

    let (mut low, mut high) = (0.0f32, 1.0f32);
    let mut steps = 0u32;

    while high - low > params.tolerance && high > params.min_quality {
        let mid = (low + high) / 2.0;
        let bytes = match backend.encode_lossy(image, mid) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(quality = mid, error = %e, "encode failed, stopping search");
                break;
            }
        };
        steps += 1;

        if budget.admits(bytes.len()) {
            debug!(quality = mid, bytes = bytes.len(), "within budget");
            best = Some(EncodedArtifact::lossy(bytes, mid));
            fallback = None;
            low = mid;
        } else {
            debug!(quality = mid, bytes = bytes.len(), "over budget");
            let smaller = fallback.as_ref().is_none_or(|f| bytes.len() < f.len());
            if params.over_budget == OverBudgetPolicy::Smallest && best.is_none() && smaller {
                fallback = Some(EncodedArtifact::lossy(bytes, mid));
            }
            high = mid;
        }
    }

    debug!(
        steps,
        low,
        high,
        found = best.is_some(),
        "lossy search finished"
    );
    best.or(fallback)
}
