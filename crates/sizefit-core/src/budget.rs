//! Caller-supplied limits: the byte-size budget and the maximum pixel dimension.
//!
//! Both are validated at construction so the engine operations never see a
//! non-positive or non-finite limit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes in one megabyte, as budgets are expressed (binary megabytes).
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Default bound for the longer side of a downsampled image.
pub const DEFAULT_MAX_DIMENSION: f64 = 2048.0;

#[derive(Debug, Error, PartialEq)]
pub enum BudgetError {
    #[error("Size budget must be a positive, finite number of megabytes, got {0}")]
    InvalidBudget(f64),

    #[error("Max dimension must be a positive, finite number of pixels, got {0}")]
    InvalidMaxDimension(f64),
}

/// Upper bound on encoded output size, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SizeBudget(f64);

impl SizeBudget {
    pub fn from_megabytes(megabytes: f64) -> Result<Self, BudgetError> {
        if megabytes.is_finite() && megabytes > 0.0 {
            Ok(Self(megabytes))
        } else {
            Err(BudgetError::InvalidBudget(megabytes))
        }
    }

    pub fn megabytes(self) -> f64 {
        self.0
    }

    /// Whether an output of `len` bytes fits within the budget (inclusive).
    pub fn admits(self, len: usize) -> bool {
        len as f64 / BYTES_PER_MEGABYTE <= self.0
    }
}

impl TryFrom<f64> for SizeBudget {
    type Error = BudgetError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_megabytes(value)
    }
}

impl From<SizeBudget> for f64 {
    fn from(budget: SizeBudget) -> Self {
        budget.0
    }
}

/// Bound on the larger side of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MaxDimension(f64);

impl MaxDimension {
    pub fn new(pixels: f64) -> Result<Self, BudgetError> {
        if pixels.is_finite() && pixels > 0.0 {
            Ok(Self(pixels))
        } else {
            Err(BudgetError::InvalidMaxDimension(pixels))
        }
    }

    pub fn pixels(self) -> f64 {
        self.0
    }

    /// Whether a `width` x `height` image already fits.
    pub fn fits(self, width: u32, height: u32) -> bool {
        width as f64 <= self.0 && height as f64 <= self.0
    }
}

impl Default for MaxDimension {
    fn default() -> Self {
        Self(DEFAULT_MAX_DIMENSION)
    }
}

impl TryFrom<f64> for MaxDimension {
    type Error = BudgetError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaxDimension> for f64 {
    fn from(max: MaxDimension) -> Self {
        max.0
    }
}
