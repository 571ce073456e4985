use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters used for crop smoothing.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Kernel with radius `round(truncate * sigma)`. A non-positive sigma
    /// yields the identity kernel.
    pub fn new(sigma: f32, truncate: f32) -> Self {
        if sigma.is_nan() || sigma <= 0.0 {
            return Self { taps: vec![1.0] };
        }
        let radius = (truncate * sigma + 0.5).floor().max(0.0) as i32;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }

    pub fn radius(&self) -> usize {
        self.taps.len() / 2
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Apply a separable filter (horizontal then vertical pass), replicating
/// border samples.
pub fn apply(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);
    let mut tmp = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let row = src.row(y);
        let dst = tmp.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * row[sx];
            }
            *px = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = tmp.row(sy);
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += tap * s;
            }
        }
    }
    out
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_sigma_kernel_has_radius_four() {
        let k = GaussianKernel::new(1.0, 4.0);
        assert_eq!(k.radius(), 4);
        let sum: f32 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(k.taps()[4] > k.taps()[3]);
    }

    #[test]
    fn blur_preserves_constant_image() {
        let img = ImageF32::filled(7, 5, 0.4);
        let out = apply(&GaussianKernel::new(1.0, 4.0), &img);
        assert!(out.data.iter().all(|&v| (v - 0.4).abs() < 1e-6));
    }

    #[test]
    fn zero_sigma_is_identity() {
        let img = ImageF32::from_vec(3, 1, vec![0.0, 1.0, 0.5]).unwrap();
        let out = apply(&GaussianKernel::new(0.0, 4.0), &img);
        assert_eq!(out, img);
    }
}
