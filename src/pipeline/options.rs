use crate::binarize::BinarizeOptions;
use crate::normalize::NormalizeOptions;
use crate::segment::CalibrationTable;
use crate::trace::TraceOptions;
use serde::Deserialize;

/// Pipeline-wide parameters, one block per stage.
///
/// The canonical page size is not a separate setting: pages are resized to
/// the size the calibration table was drawn for.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub calibration: CalibrationTable,
    pub binarize: BinarizeOptions,
    pub trace: TraceOptions,
    /// Fan the per-lead stages out over the rayon pool.
    pub parallel_leads: bool,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            calibration: CalibrationTable::default(),
            binarize: BinarizeOptions::default(),
            trace: TraceOptions::default(),
            parallel_leads: true,
        }
    }
}

impl PipelineParams {
    /// Resize target for the loader, taken from the calibration table.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            width: self.calibration.width(),
            height: self.calibration.height(),
        }
    }

    pub fn with_calibration(mut self, calibration: CalibrationTable) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn with_parallel_leads(mut self, parallel: bool) -> Self {
        self.parallel_leads = parallel;
        self
    }
}
