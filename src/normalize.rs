//! Image loader/normalizer: decode, grayscale, resize to the canonical page.
//!
//! The lead calibration table is expressed in pixels of the canonical page,
//! so every input is interpolated (never cropped) to exactly
//! `width × height` before segmentation. Grayscale conversion uses the
//! Rec.709 luminance weights applied by the `image` crate.

use crate::error::EcgError;
use crate::image::io::{decode_image, read_image};
use crate::image::{ImageF32, ImageU8, ImageView};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Luma};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical page width in pixels.
pub const CANONICAL_WIDTH: usize = 2213;
/// Canonical page height in pixels.
pub const CANONICAL_HEIGHT: usize = 1572;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub width: usize,
    pub height: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
        }
    }
}

/// Grayscale page at the canonical resolution, intensities in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    pub image: ImageF32,
    /// Resolution of the decoded source before resizing.
    pub source_size: (usize, usize),
}

impl NormalizedImage {
    pub fn width(&self) -> usize {
        self.image.w
    }

    pub fn height(&self) -> usize {
        self.image.h
    }
}

type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Decode encoded bytes and normalize them.
pub fn normalize_bytes(bytes: &[u8], options: NormalizeOptions) -> Result<NormalizedImage, EcgError> {
    let decoded = decode_image(bytes)?;
    Ok(normalize_dynamic(&decoded, options))
}

/// Read an image file and normalize it.
pub fn load_normalized(path: &Path, options: NormalizeOptions) -> Result<NormalizedImage, EcgError> {
    let decoded = read_image(path)?;
    Ok(normalize_dynamic(&decoded, options))
}

/// Normalize an already decoded image.
pub fn normalize_dynamic(decoded: &DynamicImage, options: NormalizeOptions) -> NormalizedImage {
    let gray = decoded.to_luma32f();
    let source_size = (gray.width() as usize, gray.height() as usize);
    resize_gray(gray, source_size, options)
}

/// Normalize a raw 8-bit grayscale buffer. An empty view is a decode
/// failure.
pub fn normalize_view(view: ImageU8<'_>, options: NormalizeOptions) -> Result<NormalizedImage, EcgError> {
    if view.is_empty() {
        return Err(EcgError::Decode(format!(
            "empty {}x{} grayscale buffer",
            view.w, view.h
        )));
    }
    let source_size = (view.w, view.h);
    let img = view.to_f32();
    let gray = GrayF32::from_raw(view.w as u32, view.h as u32, img.data)
        .ok_or_else(|| EcgError::Decode(format!("{}x{} buffer does not fit its pixels", view.w, view.h)))?;
    Ok(resize_gray(gray, source_size, options))
}

fn resize_gray(gray: GrayF32, source_size: (usize, usize), options: NormalizeOptions) -> NormalizedImage {
    let (w, h) = (options.width, options.height);
    let resized = if source_size == (w, h) {
        gray
    } else {
        debug!(
            "normalize: resizing {}x{} -> {}x{}",
            source_size.0, source_size.1, w, h
        );
        imageops::resize(&gray, w as u32, h as u32, FilterType::Triangle)
    };
    let mut data = resized.into_raw();
    for v in &mut data {
        *v = v.clamp(0.0, 1.0);
    }
    NormalizedImage {
        image: ImageF32 {
            w,
            h,
            stride: w,
            data,
        },
        source_size,
    }
}
