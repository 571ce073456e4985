//! Per-lead stages: binarize then trace, independently for every crop.

use crate::binarize::{binarize, BinarizeOptions};
use crate::diagnostics::LeadReport;
use crate::error::EcgError;
use crate::image::BinaryMask;
use crate::segment::LeadCrop;
use crate::trace::{extract_trace, LeadTrace, TraceOptions};
use log::{debug, warn};
use rayon::prelude::*;

/// Binarized mask and recovered trace of one lead.
#[derive(Clone, Debug)]
pub struct LeadOutcome {
    pub mask: BinaryMask,
    pub trace: LeadTrace,
    pub report: LeadReport,
}

pub fn process_lead(
    crop: &LeadCrop,
    binarize_opts: &BinarizeOptions,
    trace_opts: &TraceOptions,
) -> Result<LeadOutcome, EcgError> {
    let binarized = binarize(&crop.image, binarize_opts);
    let ink_fraction = binarized.mask.ink_fraction();
    debug!(
        "lead {}: threshold={:.4} ink={:.4}",
        crop.lead, binarized.threshold, ink_fraction
    );
    let trace = extract_trace(crop.lead, &binarized.mask, trace_opts)?;
    if trace.touches_border {
        warn!(
            "lead {}: selected contour ({} points) runs into the crop edge",
            crop.lead, trace.contour_points
        );
    }
    let report = LeadReport {
        lead: crop.lead,
        rect: crop.rect,
        threshold: binarized.threshold,
        ink_fraction,
        contour_count: trace.contour_count,
        contour_points: trace.contour_points,
        touches_border: trace.touches_border,
    };
    Ok(LeadOutcome {
        mask: binarized.mask,
        trace,
        report,
    })
}

/// Process every crop, in parallel when `parallel` is set. Results keep the
/// crop order. Any failing lead aborts the batch; run sequentially to get
/// the lowest failing lead.
pub fn process_leads(
    crops: &[LeadCrop],
    binarize_opts: &BinarizeOptions,
    trace_opts: &TraceOptions,
    parallel: bool,
) -> Result<Vec<LeadOutcome>, EcgError> {
    if parallel {
        crops
            .par_iter()
            .map(|crop| process_lead(crop, binarize_opts, trace_opts))
            .collect()
    } else {
        crops
            .iter()
            .map(|crop| process_lead(crop, binarize_opts, trace_opts))
            .collect()
    }
}

/// Process every crop and keep each lead's own result, failures included.
pub fn trace_leads(
    crops: &[LeadCrop],
    binarize_opts: &BinarizeOptions,
    trace_opts: &TraceOptions,
    parallel: bool,
) -> Vec<Result<LeadOutcome, EcgError>> {
    if parallel {
        crops
            .par_iter()
            .map(|crop| process_lead(crop, binarize_opts, trace_opts))
            .collect()
    } else {
        crops
            .iter()
            .map(|crop| process_lead(crop, binarize_opts, trace_opts))
            .collect()
    }
}
