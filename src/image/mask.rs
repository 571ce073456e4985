use super::traits::ImageView;

/// Boolean ink mask with the same shape as the lead crop it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl BinaryMask {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        self.data[y * self.w + x] = ink;
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn ink_fraction(&self) -> f32 {
        self.ink_count() as f32 / self.data.len().max(1) as f32
    }
}

impl ImageView for BinaryMask {
    type Pixel = bool;

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
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[bool]> {
        Some(&self.data)
    }
}
