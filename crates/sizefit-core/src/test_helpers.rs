//! Shared test utilities.
//!
//! Provides deterministic synthetic images and [`SyntheticBackend`], an
//! [`ImageBackend`] whose encoded size is a known function of quality. The
//! backend records every call so tests can assert exactly how many encodes a
//! search performed and at which qualities.

use std::cell::{Cell, RefCell};

use crate::backend::ImageBackend;
use crate::budget::BYTES_PER_MEGABYTE;
use crate::decode::{DecodeError, RasterImage};
use crate::encode::EncodeError;

/// Deterministic xorshift noise. Noise is the worst case for both encoders,
/// so it is the easiest way to make quality visibly drive output size.
pub fn noise(width: u32, height: u32, seed: u32) -> RasterImage {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let pixels = (0..width as usize * height as usize * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    RasterImage::new(width, height, pixels)
}

/// Grid of flat `block` x `block` tiles with pseudo-random colours.
pub fn mosaic(width: u32, height: u32, block: u32, seed: u32) -> RasterImage {
    let palette = noise(width.div_ceil(block), height.div_ceil(block), seed);
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let tile = ((y / block) * palette.width + (x / block)) as usize * 3;
            pixels.extend_from_slice(&palette.pixels[tile..tile + 3]);
        }
    }
    RasterImage::new(width, height, pixels)
}

/// Megabytes to bytes, truncated.
pub fn mb(megabytes: f64) -> usize {
    (megabytes * BYTES_PER_MEGABYTE) as usize
}

/// Backend with a synthetic, fully predictable size curve.
pub struct SyntheticBackend {
    lossy_size: Box<dyn Fn(f32) -> usize>,
    lossless_size: usize,
    fail_lossy_from_call: Option<usize>,
    fail_lossless: bool,
    fail_render: bool,
    pub lossy_calls: RefCell<Vec<f32>>,
    pub lossless_calls: Cell<usize>,
    pub render_calls: RefCell<Vec<(u32, u32)>>,
}

impl SyntheticBackend {
    /// Lossy output of `size(q)` bytes; lossless output of 1 MB.
    pub fn new(size: impl Fn(f32) -> usize + 'static) -> Self {
        Self {
            lossy_size: Box::new(size),
            lossless_size: mb(1.0),
            fail_lossy_from_call: None,
            fail_lossless: false,
            fail_render: false,
            lossy_calls: RefCell::new(Vec::new()),
            lossless_calls: Cell::new(0),
            render_calls: RefCell::new(Vec::new()),
        }
    }

    /// Lossy size grows linearly from 0 at q=0 to `max_mb` at q=1.
    pub fn linear(max_mb: f64) -> Self {
        Self::new(move |q| (q as f64 * max_mb * BYTES_PER_MEGABYTE) as usize)
    }

    pub fn with_lossless_size(mut self, bytes: usize) -> Self {
        self.lossless_size = bytes;
        self
    }

    /// Every lossy encode from the `call`-th (0-based) onward fails.
    pub fn failing_lossy_from(mut self, call: usize) -> Self {
        self.fail_lossy_from_call = Some(call);
        self
    }

    pub fn failing_lossless(mut self) -> Self {
        self.fail_lossless = true;
        self
    }

    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    pub fn lossy_call_count(&self) -> usize {
        self.lossy_calls.borrow().len()
    }
}

impl ImageBackend for SyntheticBackend {
    fn render_at_size(
        &self,
        _image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, DecodeError> {
        self.render_calls.borrow_mut().push((width, height));
        if self.fail_render {
            return Err(DecodeError::CorruptedFile("synthetic render failure".into()));
        }
        Ok(RasterImage::filled(width, height, [0, 0, 0]))
    }

    fn encode_lossy(&self, _image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        let call = self.lossy_call_count();
        self.lossy_calls.borrow_mut().push(quality);
        if self.fail_lossy_from_call.is_some_and(|from| call >= from) {
            return Err(EncodeError::EncodingFailed {
                format: "synthetic",
                message: format!("refused quality {quality}"),
            });
        }
        Ok(vec![0u8; (self.lossy_size)(quality)])
    }

    fn encode_lossless(&self, _image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
        self.lossless_calls.set(self.lossless_calls.get() + 1);
        if self.fail_lossless {
            return Err(EncodeError::EncodingFailed {
                format: "synthetic",
                message: "refused".into(),
            });
        }
        Ok(vec![0u8; self.lossless_size])
    }
}
