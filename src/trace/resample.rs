//! Fixed-length resampling and per-axis min-max scaling of contour points.

use crate::binarize::{GaussianKernel, SeparableFilter};

/// Resample an ordered point sequence to `samples` points, interpolating
/// each coordinate independently.
///
/// Output sample `i` reads source position `(i + 0.5) * n / samples - 0.5`,
/// clamped to the sequence. When shrinking and `antialias` is set, each axis
/// is first smoothed with a Gaussian of sigma `(n / samples - 1) / 2`.
pub fn resample_points(points: &[[f32; 2]], samples: usize, antialias: bool) -> Vec<[f32; 2]> {
    if points.is_empty() || samples == 0 {
        return Vec::new();
    }
    let rows: Vec<f32> = points.iter().map(|p| p[0]).collect();
    let cols: Vec<f32> = points.iter().map(|p| p[1]).collect();
    let rows = resample_axis(&rows, samples, antialias);
    let cols = resample_axis(&cols, samples, antialias);
    rows.into_iter().zip(cols).map(|(r, c)| [r, c]).collect()
}

fn resample_axis(values: &[f32], samples: usize, antialias: bool) -> Vec<f32> {
    let n = values.len();
    let scale = n as f32 / samples as f32;
    let smoothed;
    let src = if antialias && scale > 1.0 {
        smoothed = smooth_1d(values, &GaussianKernel::new((scale - 1.0) / 2.0, 4.0));
        smoothed.as_slice()
    } else {
        values
    };

    let last = (n - 1) as f32;
    (0..samples)
        .map(|i| {
            let pos = ((i as f32 + 0.5) * scale - 0.5).clamp(0.0, last);
            let i0 = pos.floor() as usize;
            let i1 = (i0 + 1).min(n - 1);
            let frac = pos - i0 as f32;
            src[i0] * (1.0 - frac) + src[i1] * frac
        })
        .collect()
}

fn smooth_1d(values: &[f32], kernel: &dyn SeparableFilter) -> Vec<f32> {
    let taps = kernel.taps();
    let radius = (taps.len() / 2) as isize;
    let n = values.len() as isize;
    (0..n)
        .map(|i| {
            taps.iter()
                .enumerate()
                .map(|(k, &t)| {
                    let j = (i + k as isize - radius).clamp(0, n - 1);
                    t * values[j as usize]
                })
                .sum()
        })
        .collect()
}

/// Scale values to `[0, 1]` by their own min and max. A constant sequence
/// maps to all zeros.
pub fn min_max_scale(values: &[f32]) -> Vec<f32> {
    let Some((lo, hi)) = values.iter().copied().fold(None, |acc: Option<(f32, f32)>, v| {
        Some(match acc {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        })
    }) else {
        return Vec::new();
    };
    let range = hi - lo;
    if range <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|&v| ((v - lo) / range).clamp(0.0, 1.0))
        .collect()
}
