//! Decoding encoded bytes into a [`RasterImage`], with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, Orientation, RasterImage};

/// Decode image bytes (JPEG or PNG), applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognised and
/// `DecodeError::CorruptedFile` if the data is truncated or malformed.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let orientation = get_orientation(bytes);
    let img = read_dynamic(bytes)?;
    Ok(RasterImage::from_rgb_image(
        apply_orientation(img, orientation).into_rgb8(),
    ))
}

/// Decode image bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(RasterImage::from_rgb_image(img.into_rgb8()))
}

/// Extract the EXIF orientation from encoded bytes.
///
/// Returns `Orientation::Normal` when there is no EXIF block or the tag is
/// missing.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    fn two_pixel_image() -> RasterImage {
        RasterImage::new(2, 1, vec![255, 0, 0, 0, 255, 0])
    }

    #[test]
    fn test_decode_png_roundtrip_is_exact() {
        let img = two_pixel_image();
        let png = encode_png(&img).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let img = RasterImage::filled(40, 30, [90, 120, 200]);
        let jpeg = encode_jpeg(&img, 0.9).unwrap();

        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (40, 30));
        assert_eq!(decoded.pixels.len(), 40 * 30 * 3);
    }

    #[test]
    fn test_decode_no_orientation_matches_plain_decode_without_exif() {
        let jpeg = encode_jpeg(&RasterImage::filled(8, 4, [1, 2, 3]), 0.8).unwrap();

        let a = decode_image(&jpeg).unwrap();
        let b = decode_image_no_orientation(&jpeg).unwrap();
        assert_eq!(a.dimensions(), b.dimensions());
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_jpeg() {
        let jpeg = encode_jpeg(&RasterImage::filled(32, 32, [5, 5, 5]), 0.9).unwrap();
        let result = decode_image(&jpeg[..20]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_defaults_without_exif() {
        let png = encode_png(&two_pixel_image()).unwrap();
        assert_eq!(get_orientation(&png), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let rgb = image::RgbImage::from_raw(2, 1, two_pixel_image().pixels).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);
        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = image::RgbImage::from_raw(2, 1, two_pixel_image().pixels).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal)
            .into_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
