//! Pretrained model stages: dimensionality reduction and classification.
//!
//! Both stages sit behind small traits so the pipeline can run against the
//! shipped JSON artifacts ([`LinearProjection`], [`LinearDiscriminant`]) or
//! against deterministic stand-ins in tests. Models are immutable after
//! load and shared read-only between concurrent classifications.

mod artifact;
mod discriminant;
mod projection;

pub use artifact::{DiscriminantArtifact, ProjectionArtifact};
pub use discriminant::LinearDiscriminant;
pub use projection::LinearProjection;

use crate::error::{EcgError, ModelStage};
use crate::types::{Diagnosis, FeatureVector, ReducedVector};
use std::path::Path;
use std::sync::Arc;

/// Linear projection from the feature space to a smaller space.
pub trait Reducer: Send + Sync {
    fn input_dim(&self) -> usize;
    fn output_dim(&self) -> usize;
    fn transform(&self, features: &FeatureVector) -> Result<ReducedVector, EcgError>;
}

/// Discriminant producing an integer label code.
pub trait Classifier: Send + Sync {
    fn input_dim(&self) -> usize;
    fn predict(&self, reduced: &ReducedVector) -> Result<u32, EcgError>;
}

/// Loaded reducer/classifier pair.
#[derive(Clone)]
pub struct Models {
    reducer: Arc<dyn Reducer>,
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for Models {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Models")
            .field("input_dim", &self.reducer.input_dim())
            .field("reduced_dim", &self.reducer.output_dim())
            .finish()
    }
}

impl Models {
    /// Pair a reducer with a classifier whose input matches its output.
    pub fn new(reducer: Arc<dyn Reducer>, classifier: Arc<dyn Classifier>) -> Result<Self, EcgError> {
        if reducer.output_dim() != classifier.input_dim() {
            return Err(EcgError::DimensionMismatch {
                stage: ModelStage::Classifier,
                expected: classifier.input_dim(),
                actual: reducer.output_dim(),
            });
        }
        Ok(Self {
            reducer,
            classifier,
        })
    }

    /// Load both JSON artifacts from disk.
    pub fn load(projection: &Path, classifier: &Path) -> Result<Self, EcgError> {
        let reducer = LinearProjection::from_json_file(projection)?;
        let classifier = LinearDiscriminant::from_json_file(classifier)?;
        Self::new(Arc::new(reducer), Arc::new(classifier))
    }

    pub fn reducer(&self) -> &dyn Reducer {
        self.reducer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn input_dim(&self) -> usize {
        self.reducer.input_dim()
    }

    /// Reduce, predict and map the label code.
    pub fn diagnose(&self, features: &FeatureVector) -> Result<Prediction, EcgError> {
        let reduced = self.reducer.transform(features)?;
        let code = self.classifier.predict(&reduced)?;
        let diagnosis = Diagnosis::from_code(code).ok_or(EcgError::UnknownLabelCode(code))?;
        Ok(Prediction {
            diagnosis,
            code,
            reduced,
        })
    }
}

/// Classifier output with the intermediate reduced vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub diagnosis: Diagnosis,
    pub code: u32,
    pub reduced: ReducedVector,
}

pub(crate) fn check_dim(stage: ModelStage, expected: usize, actual: usize) -> Result<(), EcgError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EcgError::DimensionMismatch {
            stage,
            expected,
            actual,
        })
    }
}
