//! On-disk JSON layout of the pretrained artifacts.
//!
//! Matrices are stored row-major as nested arrays. The `version` string is
//! carried through to reports so a classification can be tied to the
//! artifact that produced it.

use crate::error::EcgError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Principal-component style projection: `(x - mean) · componentsᵀ`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectionArtifact {
    #[serde(default)]
    pub version: String,
    pub mean: Vec<f64>,
    pub components: Vec<Vec<f64>>,
    #[serde(default)]
    pub whiten: bool,
    #[serde(default)]
    pub explained_variance: Option<Vec<f64>>,
}

/// Linear decision function over the reduced space.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscriminantArtifact {
    #[serde(default)]
    pub version: String,
    pub classes: Vec<u32>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EcgError> {
    let data = fs::read_to_string(path).map_err(|e| EcgError::model_load(path, e.to_string()))?;
    serde_json::from_str(&data).map_err(|e| EcgError::model_load(path, e.to_string()))
}

/// Turn nested rows into a row-major buffer, checking every row has `cols`
/// finite entries.
pub(crate) fn flatten_rows(rows: &[Vec<f64>], cols: usize, what: &str) -> Result<Vec<f64>, String> {
    let mut out = Vec::with_capacity(rows.len() * cols);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != cols {
            return Err(format!(
                "{what} row {i} has {} entries, expected {cols}",
                row.len()
            ));
        }
        if let Some(v) = row.iter().find(|v| !v.is_finite()) {
            return Err(format!("{what} row {i} contains non-finite value {v}"));
        }
        out.extend_from_slice(row);
    }
    Ok(out)
}

pub(crate) fn check_finite(values: &[f64], what: &str) -> Result<(), String> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(format!("{what} contains non-finite value {v}")),
        None => Ok(()),
    }
}
