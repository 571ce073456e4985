//! Diagnostics data model returned alongside a classification.
//!
//! `ClassificationReport` is the entry point: the diagnosis, the raw label
//! code and reduced vector, plus a `PipelineTrace` with per-stage timings and
//! per-lead statistics. Everything serializes to camelCase JSON for tools.

pub mod leads;
pub mod report;
pub mod timing;

pub use leads::LeadReport;
pub use report::{ClassificationReport, InputDescriptor, PipelineTrace};
pub use timing::{Stage, StageTiming, TimingBreakdown};
