//! Image buffers shared by every stage.
//!
//! - [`ImageF32`]: owned single-channel float image, intensities in `[0, 1]`.
//! - [`ImageU8`]: borrowed 8-bit grayscale view for callers holding raw bytes.
//! - [`BinaryMask`]: per-lead ink mask produced by the binarizer.
//! - [`io`]: decoding, PNG dumps and JSON helpers.
pub mod f32;
pub mod io;
pub mod mask;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::mask::BinaryMask;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::ImageU8;
