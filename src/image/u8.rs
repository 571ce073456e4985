use super::{ImageF32, ImageView, ImageViewMut};

/// Borrowed 8-bit grayscale page, e.g. a camera or scanner buffer that is
/// already luminance. Rows may be padded (`stride >= w`).
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Packed view over `data`, `None` when the length does not match.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Intensities rescaled to `[0, 1]`, padding dropped.
    pub fn to_f32(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            for (dst, &px) in out.row_mut(y).iter_mut().zip(self.row(y)) {
                *dst = f32::from(px) / 255.0;
            }
        }
        out
    }
}

impl ImageView for ImageU8<'_> {
    type Pixel = u8;

    fn width(&self) -> usize {
        self.w
    }
    fn height(&self) -> usize {
        self.h
    }
    fn stride(&self) -> usize {
        self.stride
    }
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then(|| &self.data[..self.w * self.h])
    }
}
