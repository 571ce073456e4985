//! End-to-end classification of a photographed ECG page.
//!
//! [`EcgPipeline`] runs the stages in a fixed order:
//!
//! - Normalize: decode, grayscale, resize to the canonical page.
//! - Segment: crop the calibration-table regions (12 leads + rhythm strip).
//! - Leads: binarize and trace every crop, fanned out over rayon and joined
//!   back in lead order.
//! - Aggregate: concatenate the twelve standard-lead signals.
//! - Models: project and classify, then map the label code.
//!
//! Any stage error aborts the run; there are no partial results and no
//! retries. The pipeline holds no per-request state, so one instance (and
//! its models) can serve concurrent callers.
//!
//! ```no_run
//! use ecg_classifier::{EcgPipeline, Models, PipelineParams};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), ecg_classifier::EcgError> {
//! let models = Models::load(Path::new("pca.json"), Path::new("lda.json"))?;
//! let pipeline = EcgPipeline::new(PipelineParams::default(), models);
//! let diagnosis = pipeline.classify_path(Path::new("ecg.jpg"))?;
//! println!("{diagnosis}");
//! # Ok(())
//! # }
//! ```

mod leads;
mod options;

pub use leads::{process_lead, process_leads, trace_leads, LeadOutcome};
pub use options::PipelineParams;

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{ClassificationReport, InputDescriptor, PipelineTrace, Stage, TimingBreakdown};
use crate::error::EcgError;
use crate::features::aggregate;
use crate::model::Models;
use crate::normalize::{load_normalized, normalize_bytes, NormalizedImage};
use crate::segment::segment_leads;
use crate::types::{Diagnosis, LeadSignal};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Image-to-diagnosis pipeline bound to one set of models.
#[derive(Clone, Debug)]
pub struct EcgPipeline {
    params: PipelineParams,
    models: Models,
}

impl EcgPipeline {
    pub fn new(params: PipelineParams, models: Models) -> Self {
        Self { params, models }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn models(&self) -> &Models {
        &self.models
    }

    /// Classify an encoded image.
    pub fn classify(&self, bytes: &[u8]) -> Result<Diagnosis, EcgError> {
        Ok(self.classify_with_report(bytes)?.diagnosis)
    }

    /// Classify an image file.
    pub fn classify_path(&self, path: &Path) -> Result<Diagnosis, EcgError> {
        let start = Instant::now();
        let page = load_normalized(path, self.params.normalize_options())?;
        let load_ms = elapsed_ms(start);
        Ok(self.run(page, load_ms)?.diagnosis)
    }

    /// Classify an already normalized page.
    pub fn classify_normalized(&self, page: NormalizedImage) -> Result<Diagnosis, EcgError> {
        Ok(self.run(page, 0.0)?.diagnosis)
    }

    /// Classify an encoded image and keep the full diagnostics trace.
    pub fn classify_with_report(&self, bytes: &[u8]) -> Result<ClassificationReport, EcgError> {
        let start = Instant::now();
        let page = normalize_bytes(bytes, self.params.normalize_options())?;
        let load_ms = elapsed_ms(start);
        self.run(page, load_ms)
    }

    /// Classify a normalized page and keep the full diagnostics trace.
    pub fn run(&self, page: NormalizedImage, load_ms: f64) -> Result<ClassificationReport, EcgError> {
        let mut timings = TimingBreakdown::default();
        timings.record(Stage::Normalize, load_ms);

        let stage = Instant::now();
        let crops = segment_leads(&page, &self.params.calibration)?;
        timings.record_since(Stage::Segment, stage);

        let stage = Instant::now();
        let outcomes = process_leads(
            &crops,
            &self.params.binarize,
            &self.params.trace,
            self.params.parallel_leads,
        )?;
        let leads_ms = timings.record_since(Stage::Leads, stage);
        debug!("pipeline: traced {} leads in {:.1} ms", outcomes.len(), leads_ms);

        self.conclude(&page, outcomes, timings)
    }

    /// Aggregate already traced leads, run the models and assemble the
    /// report. `timings` carries the stages measured so far; the total is
    /// the sum of all recorded stages.
    pub fn conclude(
        &self,
        page: &NormalizedImage,
        outcomes: Vec<LeadOutcome>,
        mut timings: TimingBreakdown,
    ) -> Result<ClassificationReport, EcgError> {
        let input = InputDescriptor {
            source_width: page.source_size.0,
            source_height: page.source_size.1,
            width: page.width(),
            height: page.height(),
            mean_intensity: page.image.mean(),
        };

        let stage = Instant::now();
        let signals: Vec<LeadSignal> = outcomes.iter().map(|o| o.trace.signal.clone()).collect();
        let features = aggregate(&signals)?;
        timings.record_since(Stage::Aggregate, stage);

        let stage = Instant::now();
        let prediction = self.models.diagnose(&features)?;
        timings.record_since(Stage::Models, stage);
        timings.total_ms = timings.stages.iter().map(|s| s.elapsed_ms).sum();

        info!(
            "classified ECG as {} (code {}) in {:.1} ms",
            prediction.diagnosis, prediction.code, timings.total_ms
        );

        Ok(ClassificationReport {
            diagnosis: prediction.diagnosis,
            label: prediction.diagnosis.label().to_string(),
            code: prediction.code,
            reduced: prediction.reduced.0,
            trace: PipelineTrace {
                input,
                timings,
                leads: outcomes.into_iter().map(|o| o.report).collect(),
                feature_len: features.len(),
            },
        })
    }
}
