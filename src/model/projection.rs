use super::artifact::{check_finite, flatten_rows, read_json, ProjectionArtifact};
use super::{check_dim, Reducer};
use crate::error::{EcgError, ModelStage};
use crate::types::{FeatureVector, ReducedVector};
use nalgebra::{DMatrix, DVector};
use std::path::Path;

/// Pretrained linear projection `z = C (x - μ)`, optionally whitened.
#[derive(Clone, Debug)]
pub struct LinearProjection {
    mean: DVector<f64>,
    /// `k × d`, one component per row.
    components: DMatrix<f64>,
    /// Per-component divisor when whitening.
    whiten: Option<DVector<f64>>,
    version: String,
}

impl LinearProjection {
    /// Build from in-memory parameters. `explained_variance`, when given,
    /// enables whitening.
    pub fn new(
        mean: DVector<f64>,
        components: DMatrix<f64>,
        explained_variance: Option<DVector<f64>>,
    ) -> Result<Self, String> {
        if components.ncols() != mean.len() {
            return Err(format!(
                "components have {} columns but mean has {} entries",
                components.ncols(),
                mean.len()
            ));
        }
        if components.nrows() == 0 {
            return Err("projection has no components".to_string());
        }
        let whiten = match explained_variance {
            Some(var) => {
                if var.len() != components.nrows() {
                    return Err(format!(
                        "explained_variance has {} entries for {} components",
                        var.len(),
                        components.nrows()
                    ));
                }
                if var.iter().any(|&v| !(v.is_finite() && v > 0.0)) {
                    return Err("explained_variance must be positive to whiten".to_string());
                }
                Some(var.map(f64::sqrt))
            }
            None => None,
        };
        Ok(Self {
            mean,
            components,
            whiten,
            version: String::new(),
        })
    }

    pub fn from_artifact(artifact: ProjectionArtifact) -> Result<Self, String> {
        let dim = artifact.mean.len();
        check_finite(&artifact.mean, "mean")?;
        let data = flatten_rows(&artifact.components, dim, "components")?;
        let components = DMatrix::from_row_slice(artifact.components.len(), dim, &data);
        let variance = if artifact.whiten {
            let var = artifact
                .explained_variance
                .ok_or("whiten requires explained_variance")?;
            Some(DVector::from_vec(var))
        } else {
            None
        };
        let mut projection = Self::new(DVector::from_vec(artifact.mean), components, variance)?;
        projection.version = artifact.version;
        Ok(projection)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EcgError> {
        let artifact: ProjectionArtifact = read_json(path)?;
        Self::from_artifact(artifact).map_err(|reason| EcgError::model_load(path, reason))
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl Reducer for LinearProjection {
    fn input_dim(&self) -> usize {
        self.mean.len()
    }

    fn output_dim(&self) -> usize {
        self.components.nrows()
    }

    fn transform(&self, features: &FeatureVector) -> Result<ReducedVector, EcgError> {
        check_dim(ModelStage::Reducer, self.input_dim(), features.len())?;
        let x = DVector::from_column_slice(features.as_slice());
        let mut z = &self.components * (x - &self.mean);
        if let Some(scale) = &self.whiten {
            z.component_div_assign(scale);
        }
        Ok(ReducedVector(z.iter().copied().collect()))
    }
}
