//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Normalized ECG pages and lead crops both live in this buffer, with
//! intensities in `[0, 1]` (0 = black ink, 1 = white paper).
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a buffer of size `w × h` with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` on a size mismatch.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Copy the half-open window `rows × cols` into a new image.
    ///
    /// The caller guarantees the window lies inside the image.
    pub fn crop(&self, rows: (usize, usize), cols: (usize, usize)) -> ImageF32 {
        let (r0, r1) = rows;
        let (c0, c1) = cols;
        let mut out = ImageF32::new(c1 - c0, r1 - r0);
        for (dy, y) in (r0..r1).enumerate() {
            out.row_mut(dy).copy_from_slice(&self.row(y)[c0..c1]);
        }
        out
    }

    /// Smallest and largest intensity, `None` for an empty image.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn mean(&self) -> f32 {
        let denom = self.data.len().max(1) as f32;
        self.data.iter().copied().sum::<f32>() / denom
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
