//! Lead binarizer: Gaussian denoise followed by a per-crop Otsu threshold.
//!
//! Photographed pages are unevenly lit, so every crop gets its own
//! threshold computed from its own histogram. A pixel is ink when its
//! smoothed intensity is strictly below the threshold.

pub mod filters;
mod otsu;

pub use filters::{GaussianKernel, SeparableFilter};
pub use otsu::otsu_threshold;

use crate::image::{BinaryMask, ImageF32};
use serde::{Deserialize, Serialize};

/// Options controlling smoothing and thresholding of a lead crop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeOptions {
    /// Gaussian standard deviation in pixels (`<= 0` disables smoothing).
    pub sigma: f32,
    /// Kernel radius in units of `sigma`.
    pub truncate: f32,
    /// Histogram bins used by the Otsu search.
    pub bins: usize,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            truncate: 4.0,
            bins: 256,
        }
    }
}

/// Mask of one crop together with the threshold that produced it.
#[derive(Clone, Debug)]
pub struct Binarized {
    pub mask: BinaryMask,
    pub threshold: f32,
}

/// Binarize one lead crop.
pub fn binarize(crop: &ImageF32, options: &BinarizeOptions) -> Binarized {
    let kernel = GaussianKernel::new(options.sigma, options.truncate);
    let smoothed = filters::apply(&kernel, crop);
    let threshold = otsu_threshold(&smoothed.data, options.bins).unwrap_or(0.0);
    let mut mask = BinaryMask::new(crop.w, crop.h);
    for (dst, &v) in mask.data.iter_mut().zip(&smoothed.data) {
        *dst = v < threshold;
    }
    Binarized { mask, threshold }
}

#[cfg(test)]
mod tests;
