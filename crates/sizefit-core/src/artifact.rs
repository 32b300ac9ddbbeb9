//! Output formats and the encoded artifact returned by the engine.

use serde::{Deserialize, Serialize};

use crate::budget::BYTES_PER_MEGABYTE;

/// The format an image is compressed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetFormat {
    /// Quality-parameterized encoding (JPEG).
    #[default]
    Lossy,
    /// Fixed-ratio encoding with no quality dial (PNG).
    Lossless,
}

impl TargetFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            TargetFormat::Lossy => "image/jpeg",
            TargetFormat::Lossless => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Lossy => "jpg",
            TargetFormat::Lossless => "png",
        }
    }
}

/// Encoded bytes produced by one engine call.
///
/// Owned by the caller; the engine keeps nothing once it has returned one.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedArtifact {
    bytes: Vec<u8>,
    format: TargetFormat,
    quality: Option<f32>,
}

impl EncodedArtifact {
    pub fn lossy(bytes: Vec<u8>, quality: f32) -> Self {
        Self {
            bytes,
            format: TargetFormat::Lossy,
            quality: Some(quality),
        }
    }

    pub fn lossless(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            format: TargetFormat::Lossless,
            quality: None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size_megabytes(&self) -> f64 {
        self.bytes.len() as f64 / BYTES_PER_MEGABYTE
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    /// Normalized quality the bytes were encoded at; `None` for lossless output.
    pub fn quality(&self) -> Option<f32> {
        self.quality
    }
}

impl AsRef<[u8]> for EncodedArtifact {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
