//! I/O helpers for ECG page images and JSON.
//!
//! - `decode_image` / `read_image`: encoded bytes (PNG/JPEG/BMP/TIFF) into a
//!   `DynamicImage`, mapping codec failures onto the pipeline error taxonomy.
//! - `save_grayscale_f32`: write an `ImageF32` to a grayscale PNG.
//! - `save_mask`: write a `BinaryMask` as black ink on white.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryMask, ImageF32, ImageView};
use crate::error::EcgError;
use image::{DynamicImage, GrayImage, ImageError, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decode an in-memory encoded image, guessing the format from its header.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, EcgError> {
    image::load_from_memory(bytes).map_err(map_image_error)
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<DynamicImage, EcgError> {
    let bytes = fs::read(path).map_err(|source| EcgError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

fn map_image_error(err: ImageError) -> EcgError {
    match err {
        ImageError::Unsupported(e) => EcgError::UnsupportedFormat(e.to_string()),
        other => EcgError::Decode(other.to_string()),
    }
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a binary mask to a PNG (ink black, background white).
pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for y in 0..mask.h {
        for (x, &ink) in mask.row(y).iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([if ink { 0 } else { 255 }]));
        }
    }
    DynamicImage::ImageLuma8(out)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
