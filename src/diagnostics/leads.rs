use crate::segment::Rect;
use crate::types::LeadId;
use serde::Serialize;

/// Per-lead statistics recorded while binarizing and tracing.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReport {
    pub lead: LeadId,
    pub rect: Rect,
    pub threshold: f32,
    pub ink_fraction: f32,
    pub contour_count: usize,
    pub contour_points: usize,
    /// Selected contour is open, i.e. it runs into the crop edge. Grid lines
    /// and clipped traces look like this.
    pub touches_border: bool,
}
