/// Read access to a row-major single-channel raster (pages, crops, masks).
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Elements between the starts of consecutive rows.
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Whole buffer when rows are packed back to back.
    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}
