//! Marching-squares iso-contours on a binary ink mask.
//!
//! Design
//! - Ink pixels have value 1, background 0; a corner is "high" when its
//!   value is at or above `level`. Crossing points are linearly interpolated
//!   along pixel edges, so at `level = 0.8` a contour runs 0.2 px outside
//!   the ink.
//! - Each 2×2 cell walks its boundary clockwise. An edge where the walk
//!   enters the high region starts a segment, which ends at the next edge
//!   where the walk leaves it. Pairing with the *next* leaving edge cuts
//!   high corners off individually, i.e. saddle cells keep the background
//!   connected and diagonal ink pixels form separate contours.
//! - Neighbouring cells traverse a shared edge in opposite directions, so a
//!   segment's end edge is exactly the next segment's start edge. Edges are
//!   keyed by doubled integer coordinates and chained through hash maps.
//! - Closed contours repeat their first point at the end; contours that hit
//!   the mask border stay open.
//!
//! Contours are emitted in row-major order of their earliest cell.

use crate::image::BinaryMask;
use std::collections::HashMap;

/// One traced iso-line as `(row, col)` points in mask pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    pub points: Vec<[f32; 2]>,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the last point coincides with the first.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }
}

/// Edge identifier in doubled pixel coordinates: horizontal edges have an
/// even row and odd column, vertical edges the opposite.
type EdgeKey = (u32, u32);

struct Segment {
    start: EdgeKey,
    end: EdgeKey,
}

/// Trace every iso-contour of `mask` at `level`.
pub fn find_contours(mask: &BinaryMask, level: f32) -> Vec<Contour> {
    let (w, h) = (mask.w, mask.h);
    if w < 2 || h < 2 || !(level > 0.0 && level <= 1.0) {
        return Vec::new();
    }

    let value = |x: usize, y: usize| if mask.get(x, y) { 1.0f32 } else { 0.0 };
    let mut segments: Vec<Segment> = Vec::new();
    let mut points: HashMap<EdgeKey, [f32; 2]> = HashMap::new();

    for r in 0..h - 1 {
        for c in 0..w - 1 {
            // clockwise corners: tl, tr, br, bl as (row, col)
            let corners = [(r, c), (r, c + 1), (r + 1, c + 1), (r + 1, c)];
            let vals = corners.map(|(y, x)| value(x, y));
            let high = vals.map(|v| v >= level);
            if high.iter().all(|&b| b) || high.iter().all(|&b| !b) {
                continue;
            }

            // edge k runs corners[k] -> corners[(k + 1) % 4]
            let mut entering = [false; 4];
            let mut leaving = [false; 4];
            for k in 0..4 {
                let (a, b) = (k, (k + 1) % 4);
                if high[a] == high[b] {
                    continue;
                }
                let key = edge_key(r, c, k);
                points.entry(key).or_insert_with(|| {
                    let t = (level - vals[a]) / (vals[b] - vals[a]);
                    let (ya, xa) = corners[a];
                    let (yb, xb) = corners[b];
                    [
                        ya as f32 + t * (yb as f32 - ya as f32),
                        xa as f32 + t * (xb as f32 - xa as f32),
                    ]
                });
                if high[b] {
                    entering[k] = true;
                } else {
                    leaving[k] = true;
                }
            }

            for k in 0..4 {
                if !entering[k] {
                    continue;
                }
                if let Some(j) = (1..4).map(|d| (k + d) % 4).find(|&j| leaving[j]) {
                    segments.push(Segment {
                        start: edge_key(r, c, k),
                        end: edge_key(r, c, j),
                    });
                }
            }
        }
    }

    chain_segments(&segments, &points)
}

fn edge_key(r: usize, c: usize, edge: usize) -> EdgeKey {
    let (r, c) = (r as u32, c as u32);
    match edge {
        0 => (2 * r, 2 * c + 1),
        1 => (2 * r + 1, 2 * c + 2),
        2 => (2 * r + 2, 2 * c + 1),
        _ => (2 * r + 1, 2 * c),
    }
}

fn chain_segments(segments: &[Segment], points: &HashMap<EdgeKey, [f32; 2]>) -> Vec<Contour> {
    let by_start: HashMap<EdgeKey, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| (s.start, i))
        .collect();
    let by_end: HashMap<EdgeKey, usize> = segments
        .iter()
        .enumerate()
        .map(|(i, s)| (s.end, i))
        .collect();

    let mut visited = vec![false; segments.len()];
    let mut contours = Vec::new();
    for seed in 0..segments.len() {
        if visited[seed] {
            continue;
        }
        // Walk back to the head of an open chain; a loop starts at the seed.
        let mut head = seed;
        while let Some(&prev) = by_end.get(&segments[head].start) {
            if prev == seed {
                head = seed;
                break;
            }
            if visited[prev] {
                break;
            }
            head = prev;
        }

        let mut pts = Vec::new();
        if let Some(p) = points.get(&segments[head].start) {
            pts.push(*p);
        }
        let mut cur = Some(head);
        while let Some(i) = cur {
            if visited[i] {
                break;
            }
            visited[i] = true;
            if let Some(p) = points.get(&segments[i].end) {
                pts.push(*p);
            }
            cur = by_start.get(&segments[i].end).copied();
        }
        contours.push(Contour { points: pts });
    }
    contours
}
