use ecg_classifier::types::{FeatureVector, ReducedVector, STANDARD_LEADS};
use ecg_classifier::{EcgError, LinearDiscriminant, ModelStage, Models, Reducer};
use nalgebra::{DMatrix, DVector};
use std::sync::Arc;

/// Roughness below which a page reads as flat.
pub const FLAT_ROUGHNESS: f64 = 0.025;

/// Mean absolute step between consecutive samples, averaged over the
/// standard leads. An oscillating trace scores a multiple of its cycle
/// count; a flat stroke only climbs its own thickness twice.
pub struct LeadRoughness {
    input_dim: usize,
}

impl LeadRoughness {
    pub fn new(input_dim: usize) -> Self {
        Self { input_dim }
    }
}

impl Reducer for LeadRoughness {
    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn transform(&self, features: &FeatureVector) -> Result<ReducedVector, EcgError> {
        if features.len() != self.input_dim {
            return Err(EcgError::DimensionMismatch {
                stage: ModelStage::Reducer,
                expected: self.input_dim,
                actual: features.len(),
            });
        }
        let per_lead = (self.input_dim / STANDARD_LEADS).max(1);
        let total: f64 = features
            .as_slice()
            .chunks(per_lead)
            .map(|lead| {
                let steps: f64 = lead.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
                steps / (lead.len().saturating_sub(1)).max(1) as f64
            })
            .sum();
        Ok(ReducedVector(vec![total / STANDARD_LEADS as f64]))
    }
}

/// Four-class discriminant over the roughness score: code 2 (Normal) above
/// [`FLAT_ROUGHNESS`], code 1 (Abnormal Heartbeat) below it.
pub fn roughness_classifier() -> LinearDiscriminant {
    LinearDiscriminant::new(
        vec![0, 1, 2, 3],
        DMatrix::from_row_slice(4, 1, &[0.0, 0.0, 10.0, 0.0]),
        DVector::from_vec(vec![-1.0, 10.0 * FLAT_ROUGHNESS, 0.0, -1.0]),
    )
    .expect("valid discriminant")
}

pub fn trace_models(input_dim: usize) -> Models {
    Models::new(
        Arc::new(LeadRoughness::new(input_dim)),
        Arc::new(roughness_classifier()),
    )
    .expect("matching dimensions")
}
