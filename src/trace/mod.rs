//! Trace extractor: recover a lead's printed curve from its ink mask.
//!
//! Steps
//! 1. Trace every iso-contour of the mask at `level` (see [`contours`]).
//! 2. Keep the contour with the most points. Ties keep the earliest contour
//!    in row-major scan order.
//! 3. Resample it to `samples` points along the contour.
//! 4. Min-max scale rows and columns independently into `[0, 1]`.
//! 5. The scaled row axis is the lead's amplitude signal; the column axis is
//!    kept only for plotting.
//!
//! Point count is a proxy for curve length. A grid line or smear that is
//! longer than the trace wins the selection; callers see this through
//! [`LeadTrace::touches_border`] and the contour statistics.

pub mod contours;
mod resample;

pub use contours::{find_contours, Contour};
pub use resample::{min_max_scale, resample_points};

use crate::error::EcgError;
use crate::image::BinaryMask;
use crate::types::{LeadId, LeadSignal, SAMPLES_PER_LEAD};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Iso-level separating ink (1) from background (0).
    pub level: f32,
    /// Points per lead after resampling.
    pub samples: usize,
    /// Pre-smooth contours that are longer than `samples`.
    pub antialias: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            level: 0.8,
            samples: SAMPLES_PER_LEAD,
            antialias: true,
        }
    }
}

/// Recovered trace of one lead.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTrace {
    /// Scaled row (amplitude) axis.
    pub signal: LeadSignal,
    /// Scaled column (time) axis, for visualisation only.
    pub time: Vec<f32>,
    pub contour_count: usize,
    pub contour_points: usize,
    pub touches_border: bool,
}

/// Index of the contour with the most points, earliest on ties.
pub fn select_contour(contours: &[Contour]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, c) in contours.iter().enumerate() {
        if best.map_or(true, |(_, n)| c.len() > n) {
            best = Some((i, c.len()));
        }
    }
    best.map(|(i, _)| i)
}

/// Extract the lead signal from a binary mask.
pub fn extract_trace(lead: LeadId, mask: &BinaryMask, options: &TraceOptions) -> Result<LeadTrace, EcgError> {
    let contours = find_contours(mask, options.level);
    let selected = select_contour(&contours)
        .map(|i| &contours[i])
        .filter(|c| !c.is_empty())
        .ok_or(EcgError::EmptyMask { lead: lead.0 })?;

    let resampled = resample_points(&selected.points, options.samples, options.antialias);
    let rows: Vec<f32> = resampled.iter().map(|p| p[0]).collect();
    let cols: Vec<f32> = resampled.iter().map(|p| p[1]).collect();

    Ok(LeadTrace {
        signal: LeadSignal {
            lead,
            values: min_max_scale(&rows),
        },
        time: min_max_scale(&cols),
        contour_count: contours.len(),
        contour_points: selected.len(),
        touches_border: !selected.is_closed(),
    })
}
