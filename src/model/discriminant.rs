use super::artifact::{check_finite, flatten_rows, read_json, DiscriminantArtifact};
use super::{check_dim, Classifier};
use crate::error::{EcgError, ModelStage};
use crate::types::{Diagnosis, ReducedVector};
use nalgebra::{DMatrix, DVector};
use std::path::Path;

/// Pretrained linear discriminant: scores `W z + b`, one row per class.
///
/// A single-row model is a binary discriminant and picks `classes[1]` when
/// its score is positive, `classes[0]` otherwise.
#[derive(Clone, Debug)]
pub struct LinearDiscriminant {
    classes: Vec<u32>,
    coef: DMatrix<f64>,
    intercept: DVector<f64>,
    version: String,
}

impl LinearDiscriminant {
    pub fn new(classes: Vec<u32>, coef: DMatrix<f64>, intercept: DVector<f64>) -> Result<Self, String> {
        if coef.nrows() != intercept.len() {
            return Err(format!(
                "coef has {} rows but intercept has {} entries",
                coef.nrows(),
                intercept.len()
            ));
        }
        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if classes.len() < 2 || (coef.nrows() != expected_rows && coef.nrows() != classes.len()) {
            return Err(format!(
                "{} classes cannot be scored by {} coefficient rows",
                classes.len(),
                coef.nrows()
            ));
        }
        if let Some(bad) = classes.iter().find(|&&c| Diagnosis::from_code(c).is_none()) {
            return Err(format!("class code {bad} has no diagnosis"));
        }
        Ok(Self {
            classes,
            coef,
            intercept,
            version: String::new(),
        })
    }

    pub fn from_artifact(artifact: DiscriminantArtifact) -> Result<Self, String> {
        let dim = artifact.coef.first().map_or(0, Vec::len);
        let data = flatten_rows(&artifact.coef, dim, "coef")?;
        check_finite(&artifact.intercept, "intercept")?;
        let coef = DMatrix::from_row_slice(artifact.coef.len(), dim, &data);
        let mut model = Self::new(artifact.classes, coef, DVector::from_vec(artifact.intercept))?;
        model.version = artifact.version;
        Ok(model)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EcgError> {
        let artifact: DiscriminantArtifact = read_json(path)?;
        Self::from_artifact(artifact).map_err(|reason| EcgError::model_load(path, reason))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Raw decision scores for `z`.
    pub fn decision_function(&self, reduced: &ReducedVector) -> Result<Vec<f64>, EcgError> {
        check_dim(ModelStage::Classifier, self.input_dim(), reduced.len())?;
        let z = DVector::from_column_slice(reduced.as_slice());
        let scores = &self.coef * z + &self.intercept;
        Ok(scores.iter().copied().collect())
    }
}

impl Classifier for LinearDiscriminant {
    fn input_dim(&self) -> usize {
        self.coef.ncols()
    }

    fn predict(&self, reduced: &ReducedVector) -> Result<u32, EcgError> {
        let scores = self.decision_function(reduced)?;
        if scores.len() == 1 {
            let idx = usize::from(scores[0] > 0.0);
            return Ok(self.classes[idx]);
        }
        // first maximum wins, so ties resolve to the lower class index
        let mut best = 0;
        for (i, &s) in scores.iter().enumerate() {
            if s > scores[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn four_class() -> LinearDiscriminant {
        LinearDiscriminant::new(
            vec![0, 1, 2, 3],
            DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 0.0, 1.0, -1.0, 0.0, 0.0, -1.0]),
            DVector::from_vec(vec![0.0, 0.0, 0.5, 0.0]),
        )
        .unwrap()
    }

    #[test]
    fn picks_highest_scoring_class() {
        let m = four_class();
        assert_eq!(m.predict(&ReducedVector(vec![2.0, 0.0])).unwrap(), 0);
        assert_eq!(m.predict(&ReducedVector(vec![0.0, 2.0])).unwrap(), 1);
        assert_eq!(m.predict(&ReducedVector(vec![0.0, 0.0])).unwrap(), 2);
        assert_eq!(m.predict(&ReducedVector(vec![0.0, -2.0])).unwrap(), 3);
    }

    #[test]
    fn binary_model_uses_score_sign() {
        let m = LinearDiscriminant::new(
            vec![2, 0],
            DMatrix::from_row_slice(1, 1, &[1.0]),
            DVector::from_vec(vec![-0.5]),
        )
        .unwrap();
        assert_eq!(m.predict(&ReducedVector(vec![0.0])).unwrap(), 2);
        assert_eq!(m.predict(&ReducedVector(vec![1.0])).unwrap(), 0);
    }

    #[test]
    fn wrong_reduced_length_fails_at_classifier() {
        let err = four_class().predict(&ReducedVector(vec![1.0])).unwrap_err();
        assert!(matches!(
            err,
            EcgError::DimensionMismatch {
                stage: ModelStage::Classifier,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn out_of_table_class_code_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"classes":[0,7],"coef":[[1.0]],"intercept":[0.0]}}"#
        )
        .unwrap();
        let err = LinearDiscriminant::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, EcgError::ModelLoad { .. }));
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            LinearDiscriminant::from_json_file(file.path()),
            Err(EcgError::ModelLoad { .. })
        ));
    }
}
