use super::{LeadReport, TimingBreakdown};
use crate::types::Diagnosis;
use serde::Serialize;

/// Result of [`EcgPipeline::classify_with_report`](crate::EcgPipeline).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReport {
    pub diagnosis: Diagnosis,
    pub label: String,
    pub code: u32,
    pub reduced: Vec<f64>,
    pub trace: PipelineTrace,
}

/// End-to-end trace of one classification.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub leads: Vec<LeadReport>,
    pub feature_len: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub source_width: usize,
    pub source_height: usize,
    pub width: usize,
    pub height: usize,
    pub mean_intensity: f32,
}
