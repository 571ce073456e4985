//! Typed failures raised by the pipeline stages.
//!
//! Every stage aborts the whole classification on its first error; the
//! variant tells the caller which stage failed so a bad photo can be told
//! apart from a corrupt model artifact.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Model stage that rejected an input vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelStage {
    Reducer,
    Classifier,
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelStage::Reducer => f.write_str("reducer"),
            ModelStage::Classifier => f.write_str("classifier"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EcgError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid calibration table: {0}")]
    InvalidCalibration(String),

    #[error("lead {lead} has no recoverable trace")]
    EmptyMask { lead: u8 },

    #[error("expected {expected} standard leads, found {found}")]
    LeadCountMismatch { expected: usize, found: usize },

    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("{stage} expects a vector of length {expected}, got {actual}")]
    DimensionMismatch {
        stage: ModelStage,
        expected: usize,
        actual: usize,
    },

    #[error("classifier returned unknown label code {0}")]
    UnknownLabelCode(u32),
}

impl EcgError {
    pub(crate) fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EcgError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = EcgError> = std::result::Result<T, E>;
