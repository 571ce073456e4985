use super::*;

fn trace_crop(width: usize, height: usize, paper: f32, ink: f32) -> ImageF32 {
    let mut img = ImageF32::filled(width, height, paper);
    for x in 4..width - 4 {
        let y = stroke_top(x, height);
        for dy in 0..5 {
            img.set(x, (y + dy).min(height - 1), ink);
        }
    }
    img
}

fn stroke_top(x: usize, height: usize) -> usize {
    (height as f32 / 2.0 + (x as f32 / 12.0).sin() * (height as f32 / 4.0)) as usize
}

#[test]
fn trace_pixels_become_ink() {
    let crop = trace_crop(80, 40, 0.9, 0.1);
    let out = binarize(&crop, &BinarizeOptions::default());
    assert!(out.threshold > 0.1 && out.threshold < 0.9);
    assert!(out.mask.ink_count() > 0);
    assert!(!out.mask.get(0, 0), "paper corner must stay background");
    let y = stroke_top(40, 40) + 2;
    assert!(out.mask.get(40, y), "centre of the stroke must be ink");
}

#[test]
fn brightness_offset_does_not_change_mask() {
    let dark = trace_crop(96, 48, 0.625, 0.125);
    let bright = trace_crop(96, 48, 0.875, 0.375);
    let opts = BinarizeOptions::default();
    let a = binarize(&dark, &opts);
    let b = binarize(&bright, &opts);
    assert!((b.threshold - a.threshold - 0.25).abs() < 1e-3);
    assert_eq!(a.mask, b.mask);
}

#[test]
fn threshold_is_local_to_each_crop() {
    // Any single cut between the two papers would turn the whole dim crop
    // into ink.
    let dim = trace_crop(64, 32, 0.4, 0.05);
    let bright = trace_crop(64, 32, 0.95, 0.5);
    let opts = BinarizeOptions::default();
    let a = binarize(&dim, &opts);
    let b = binarize(&bright, &opts);
    assert!(a.threshold < b.threshold);
    assert_eq!(a.mask, b.mask);
}

#[test]
fn blank_crop_has_no_ink() {
    let blank = ImageF32::filled(50, 20, 0.93);
    let out = binarize(&blank, &BinarizeOptions::default());
    assert_eq!(out.mask.ink_count(), 0);
}
