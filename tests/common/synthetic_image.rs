use ecg_classifier::segment::{CalibrationTable, Rect};
use ecg_classifier::types::LeadId;
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::Cursor;

pub const PAPER: u8 = 235;
pub const INK: u8 = 30;

/// Blank page of the table's size.
pub fn blank_page(table: &CalibrationTable) -> Vec<u8> {
    vec![PAPER; table.width() * table.height()]
}

/// Page with a sinusoid in every standard lead region and a flat line in
/// the rhythm strip.
pub fn sine_page(table: &CalibrationTable, thickness: usize) -> Vec<u8> {
    let width = table.width();
    let mut img = blank_page(table);
    for region in table.regions() {
        if region.lead.is_standard() {
            draw_sine(&mut img, width, &region.rect, region.lead, thickness);
        } else {
            draw_flat(&mut img, width, &region.rect, thickness);
        }
    }
    img
}

/// Page with a flat line in every region.
pub fn flat_page(table: &CalibrationTable, thickness: usize) -> Vec<u8> {
    let width = table.width();
    let mut img = blank_page(table);
    for region in table.regions() {
        draw_flat(&mut img, width, &region.rect, thickness);
    }
    img
}

fn draw_sine(img: &mut [u8], width: usize, rect: &Rect, lead: LeadId, thickness: usize) {
    let margin = 20;
    let mid = (rect.rows.0 + rect.rows.1) as f32 / 2.0;
    let amplitude = rect.height() as f32 * 0.2;
    let period = 70.0 + 5.0 * lead.0 as f32;
    let mut prev: Option<usize> = None;
    for x in rect.cols.0 + margin..rect.cols.1 - margin {
        let phase = (x - rect.cols.0) as f32 / period * std::f32::consts::TAU;
        let y = (mid + phase.sin() * amplitude) as usize;
        let (top, bottom) = match prev {
            Some(p) => (p.min(y), p.max(y)),
            None => (y, y),
        };
        for yy in top..bottom + thickness {
            img[yy * width + x] = INK;
        }
        prev = Some(y);
    }
}

fn draw_flat(img: &mut [u8], width: usize, rect: &Rect, thickness: usize) {
    let y0 = (rect.rows.0 + rect.rows.1) / 2;
    for y in y0..y0 + thickness {
        for x in rect.cols.0 + 20..rect.cols.1 - 20 {
            img[y * width + x] = INK;
        }
    }
}

pub fn to_gray_image(buf: Vec<u8>, width: usize, height: usize) -> GrayImage {
    GrayImage::from_raw(width as u32, height as u32, buf).expect("buffer matches dimensions")
}

pub fn encode(img: GrayImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("in-memory encode succeeds");
    bytes
}

pub fn encode_png(buf: Vec<u8>, width: usize, height: usize) -> Vec<u8> {
    encode(to_gray_image(buf, width, height), ImageFormat::Png)
}
