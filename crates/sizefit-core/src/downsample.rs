//! Bounding an image's larger side without upscaling.

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::backend::ImageBackend;
use crate::budget::MaxDimension;
use crate::decode::RasterImage;

/// Output size for downsampling a `width` x `height` image to `max`.
///
/// Returns `None` when the image already fits (or has a zero side), meaning
/// it should be left untouched. Otherwise the larger side becomes
/// `floor(max)` and the smaller side is scaled by the aspect ratio, rounded,
/// and kept within `1..=floor(max)`.
pub fn target_dimensions(width: u32, height: u32, max: MaxDimension) -> Option<(u32, u32)> {
    if width == 0 || height == 0 || max.fits(width, height) {
        return None;
    }

    let bound = max.pixels().floor().clamp(1.0, u32::MAX as f64);
    let ratio = width as f64 / height as f64;

    let (new_width, new_height) = if ratio > 1.0 {
        (bound, (bound / ratio).round())
    } else {
        ((bound * ratio).round(), bound)
    };

    Some((
        new_width.clamp(1.0, bound) as u32,
        new_height.clamp(1.0, bound) as u32,
    ))
}

/// Shrink `image` so neither side exceeds `max`, preserving aspect ratio.
///
/// Images that already fit are borrowed back unchanged. If the backend fails
/// to render, the failure is logged and the original image is returned.
pub fn downsample<'a, B: ImageBackend + ?Sized>(
    backend: &B,
    image: &'a RasterImage,
    max: MaxDimension,
) -> Cow<'a, RasterImage> {
    let Some((width, height)) = target_dimensions(image.width, image.height, max) else {
        return Cow::Borrowed(image);
    };

    match backend.render_at_size(image, width, height) {
        Ok(resized) => {
            debug!(
                from_width = image.width,
                from_height = image.height,
                width,
                height,
                "downsampled"
            );
            Cow::Owned(resized)
        }
        Err(e) => {
            warn!(error = %e, width, height, "render failed, keeping original size");
            Cow::Borrowed(image)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RustBackend;
    use crate::test_helpers::SyntheticBackend;

    fn max(pixels: f64) -> MaxDimension {
        MaxDimension::new(pixels).unwrap()
    }

    #[test]
    fn test_fits_is_none() {
        assert_eq!(target_dimensions(100, 50, max(256.0)), None);
        assert_eq!(target_dimensions(256, 256, max(256.0)), None);
    }

    #[test]
    fn test_landscape() {
        assert_eq!(target_dimensions(6000, 4000, max(2560.0)), Some((2560, 1707)));
    }

    #[test]
    fn test_portrait() {
        assert_eq!(target_dimensions(4000, 6000, max(2560.0)), Some((1707, 2560)));
    }

    #[test]
    fn test_square_uses_portrait_branch() {
        assert_eq!(target_dimensions(6000, 6000, max(200.0)), Some((200, 200)));
    }

    #[test]
    fn test_one_side_over() {
        // only height exceeds; ratio < 1 so height is bounded
        assert_eq!(target_dimensions(100, 300, max(200.0)), Some((67, 200)));
    }

    #[test]
    fn test_extreme_ratio_keeps_one_pixel() {
        assert_eq!(target_dimensions(10_000, 1, max(100.0)), Some((100, 1)));
        assert_eq!(target_dimensions(1, 10_000, max(100.0)), Some((1, 100)));
    }

    #[test]
    fn test_fractional_max_floors_bound() {
        assert_eq!(target_dimensions(400, 200, max(200.7)), Some((200, 100)));
    }

    #[test]
    fn test_zero_side_is_left_alone() {
        assert_eq!(target_dimensions(0, 5000, max(100.0)), None);
    }

    #[test]
    fn test_downsample_borrows_when_fits() {
        let backend = SyntheticBackend::linear(1.0);
        let img = RasterImage::filled(50, 40, [9, 9, 9]);

        let out = downsample(&backend, &img, max(2048.0));

        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(backend.render_calls.borrow().is_empty());
    }

    #[test]
    fn test_downsample_renders_target_size() {
        let backend = SyntheticBackend::linear(1.0);
        let img = RasterImage::filled(300, 150, [9, 9, 9]);

        let out = downsample(&backend, &img, max(100.0));

        assert_eq!(out.dimensions(), (100, 50));
        assert_eq!(*backend.render_calls.borrow(), vec![(100, 50)]);
    }

    #[test]
    fn test_render_failure_returns_original() {
        let backend = SyntheticBackend::linear(1.0).failing_render();
        let img = RasterImage::filled(300, 150, [9, 9, 9]);

        let out = downsample(&backend, &img, max(100.0));

        assert_eq!(out.dimensions(), (300, 150));
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_downsample_with_real_backend() {
        let img = RasterImage::filled(640, 480, [30, 60, 90]);
        let out = downsample(&RustBackend::new(), &img, max(320.0));

        assert_eq!(out.dimensions(), (320, 240));
        assert_eq!(out.pixels.len(), 320 * 240 * 3);
    }

    #[test]
    fn test_malformed_image_falls_back() {
        let broken = RasterImage {
            width: 640,
            height: 480,
            pixels: vec![0u8; 12],
        };
        let out = downsample(&RustBackend::new(), &broken, max(320.0));
        assert_eq!(out.dimensions(), (640, 480));
    }
}
