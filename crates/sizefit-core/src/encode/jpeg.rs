//! JPEG encoding.
//!
//! Uses the `image` crate's baseline JPEG encoder. The engine works with a
//! normalized quality in `[0, 1]`; [`jpeg_quality`] maps it onto the encoder's
//! integer 1-100 scale.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};
use crate::decode::RasterImage;

/// Map a normalized quality onto the JPEG encoder's 1-100 scale.
///
/// Non-finite input is treated as the lowest quality. The mapping is
/// monotonic, so a higher normalized quality never yields a lower JPEG
/// quality.
pub fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGB image to encode
/// * `quality` - Normalized quality, `0.0` (smallest) to `1.0` (highest fidelity)
///
/// # Errors
///
/// Returns an error if the image has a zero side, if its pixel buffer does not
/// match its dimensions, or if the encoder fails.
pub fn encode_jpeg(image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));

    encoder
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Same input always produces the same bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 0.0f32..=1.0,
        ) {
            let img = RasterImage::filled(width, height, [100, 50, 25]);

            let a = encode_jpeg(&img, quality).unwrap();
            let b = encode_jpeg(&img, quality).unwrap();
            prop_assert_eq!(a, b);
        }

        /// The quality mapping never decreases as normalized quality grows.
        #[test]
        fn prop_quality_mapping_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(jpeg_quality(lo) <= jpeg_quality(hi));
        }

        /// Any aspect ratio encodes.
        #[test]
        fn prop_aspect_ratio_independence(short_side in 1u32..=16, ratio in 1u32..=8) {
            let long_side = short_side * ratio;
            let wide = RasterImage::filled(long_side, short_side, [1, 2, 3]);
            let tall = RasterImage::filled(short_side, long_side, [1, 2, 3]);

            prop_assert!(encode_jpeg(&wide, 0.8).is_ok());
            prop_assert!(encode_jpeg(&tall, 0.8).is_ok());
        }
    }
}
