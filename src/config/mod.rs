//! JSON runtime configuration for the command-line tools.
//!
//! ```json
//! {
//!   "input": "scans/ecg_001.jpg",
//!   "models": { "projection": "models/pca.json", "classifier": "models/lda.json" },
//!   "params": { "binarize": { "sigma": 1.0 }, "parallel_leads": true },
//!   "output": { "report_json": "out/report.json", "debug_dir": "out/leads" }
//! }
//! ```
//!
//! `params` and every field inside it are optional and fall back to the
//! pipeline defaults.

use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct ModelPaths {
    pub projection: PathBuf,
    pub classifier: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub report_json: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    pub models: Option<ModelPaths>,
    #[serde(default)]
    pub params: PipelineParams,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
