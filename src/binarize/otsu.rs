//! Otsu threshold over an intensity histogram.
//!
//! The histogram spans the crop's own `[min, max]` range, so the selected
//! threshold moves with a uniform brightness offset and the resulting mask
//! does not.

/// Threshold maximising the between-class variance of `values`.
///
/// Returns the centre of the best split bin. An empty slice yields `None`;
/// a constant slice yields its single value.
pub fn otsu_threshold(values: &[f32], bins: usize) -> Option<f32> {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if hi <= lo || bins < 2 {
        return Some(lo);
    }

    let range = (hi - lo) as f64;
    let bin_width = range / bins as f64;
    let mut hist = vec![0u64; bins];
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        let pos = ((v - lo) as f64 / range * bins as f64) as usize;
        hist[pos.min(bins - 1)] += 1;
    }
    let centre = |i: usize| lo as f64 + (i as f64 + 0.5) * bin_width;

    // Class 1 covers bins 0..=i, class 2 covers bins i+1..
    let total: u64 = hist.iter().sum();
    let total_sum: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| c as f64 * centre(i))
        .sum();

    let mut best = (0usize, f64::MIN);
    let mut w1 = 0u64;
    let mut s1 = 0.0f64;
    for i in 0..bins - 1 {
        w1 += hist[i];
        s1 += hist[i] as f64 * centre(i);
        let w2 = total - w1;
        if w1 == 0 || w2 == 0 {
            continue;
        }
        let m1 = s1 / w1 as f64;
        let m2 = (total_sum - s1) / w2 as f64;
        let between = w1 as f64 * w2 as f64 * (m1 - m2) * (m1 - m2);
        if between > best.1 {
            best = (i, between);
        }
    }
    Some(centre(best.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bimodal_threshold_falls_between_modes() {
        let mut values = vec![0.1f32; 300];
        values.extend(std::iter::repeat(0.9f32).take(700));
        let t = otsu_threshold(&values, 256).unwrap();
        assert!(t > 0.1 && t < 0.9, "threshold {t}");
    }

    #[test]
    fn constant_input_returns_its_value() {
        assert_eq!(otsu_threshold(&[0.5; 16], 256), Some(0.5));
        assert_eq!(otsu_threshold(&[], 256), None);
    }

    #[test]
    fn threshold_tracks_offset() {
        let base: Vec<f32> = (0..200)
            .map(|i| if i % 5 == 0 { 0.1 } else { 0.7 })
            .collect();
        let shifted: Vec<f32> = base.iter().map(|v| v + 0.2).collect();
        let t0 = otsu_threshold(&base, 256).unwrap();
        let t1 = otsu_threshold(&shifted, 256).unwrap();
        assert!((t1 - t0 - 0.2).abs() < 1e-4, "t0={t0} t1={t1}");
    }
}
