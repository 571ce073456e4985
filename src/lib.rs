#![doc = include_str!("../README.md")]

// Pipeline entry points and shared data model
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod model;
pub mod pipeline;
pub mod types;

// Stage modules, usable on their own for tooling and tests.
pub mod binarize;
pub mod features;
pub mod normalize;
pub mod segment;
pub mod trace;

// --- High-level re-exports -------------------------------------------------

pub use crate::diagnostics::{ClassificationReport, PipelineTrace};
pub use crate::error::{EcgError, ModelStage};
pub use crate::model::{Classifier, LinearDiscriminant, LinearProjection, Models, Reducer};
pub use crate::pipeline::{EcgPipeline, PipelineParams};
pub use crate::segment::CalibrationTable;
pub use crate::types::{Diagnosis, FeatureVector, LeadId, LeadSignal, ReducedVector};

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::{Diagnosis, EcgError, EcgPipeline, Models, PipelineParams};
}

// --- Stage-level API ------------------------------------------------------

pub mod stages {
    pub use crate::binarize::{binarize, BinarizeOptions, Binarized};
    pub use crate::features::aggregate;
    pub use crate::normalize::{
        load_normalized, normalize_bytes, normalize_dynamic, normalize_view, NormalizeOptions,
        NormalizedImage,
    };
    pub use crate::pipeline::{process_lead, process_leads, trace_leads, LeadOutcome};
    pub use crate::segment::{segment_leads, LeadCrop, LeadRegion, Rect};
    pub use crate::trace::{extract_trace, find_contours, select_contour, LeadTrace, TraceOptions};
}
