use std::fs;
use std::path::Path;

use log::{info, warn};
use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::{ModelError, PredictionError};
use super::features::FeatureVector;

/// On-disk artifact layout: one weight row and one intercept per class.
#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(default)]
    name: Option<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

/// A pre-trained multinomial linear classifier.
///
/// Scores each class as `w_k · x + b_k` and answers the argmax. The
/// model is immutable after construction and `classify` takes `&self`,
/// so concurrent calls need no locking.
#[derive(Debug)]
pub struct LinearClassifier {
    name: String,
    weights: Array2<f64>,
    intercepts: Array1<f64>,
}

impl LinearClassifier {
    /// Builds a classifier from raw coefficients, validating shape and
    /// finiteness.
    ///
    /// # Errors
    /// `InvalidArtifact` when the weight matrix is empty or ragged,
    /// the intercept count does not match the class count, or any
    /// coefficient is non-finite.
    pub fn from_parts(
        name: impl Into<String>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let classes = weights.len();
        if classes == 0 {
            return Err(ModelError::InvalidArtifact(
                "weight matrix has no classes".into(),
            ));
        }
        let features = weights[0].len();
        if features == 0 {
            return Err(ModelError::InvalidArtifact(
                "weight rows have no features".into(),
            ));
        }
        if weights.iter().any(|row| row.len() != features) {
            return Err(ModelError::InvalidArtifact(
                "weight matrix rows have inconsistent lengths".into(),
            ));
        }
        if intercepts.len() != classes {
            return Err(ModelError::InvalidArtifact(format!(
                "{} intercepts for {} classes",
                intercepts.len(),
                classes
            )));
        }
        if weights
            .iter()
            .flatten()
            .chain(intercepts.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ModelError::InvalidArtifact(
                "coefficients must be finite".into(),
            ));
        }

        let flat: Vec<f64> = weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((classes, features), flat)
            .map_err(|e| ModelError::InvalidArtifact(e.to_string()))?;
        Ok(Self {
            name: name.into(),
            weights,
            intercepts: Array1::from_vec(intercepts),
        })
    }

    /// Parses a JSON artifact.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: Artifact = serde_json::from_str(text)?;
        Self::from_parts(
            artifact.name.unwrap_or_else(|| "unnamed".into()),
            artifact.weights,
            artifact.intercepts,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_classes(&self) -> usize {
        self.weights.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Classifies a feature vector, returning the winning class index.
    ///
    /// Ties resolve to the lowest class index, deterministically.
    ///
    /// # Errors
    /// `ClassificationFailure` if the scores come out non-finite (an
    /// artifact with pathological coefficients) or the vector does not
    /// match the model's input dimensionality.
    pub fn classify(&self, features: &FeatureVector) -> Result<usize, PredictionError> {
        if features.values().len() != self.num_features() {
            return Err(PredictionError::ClassificationFailure(format!(
                "model expects {} features, vector has {}",
                self.num_features(),
                features.values().len()
            )));
        }

        let scores = self.weights.dot(features.values()) + &self.intercepts;
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(PredictionError::ClassificationFailure(
                "model produced a non-finite score".into(),
            ));
        }

        let mut best = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = index;
            }
        }
        Ok(best)
    }
}

/// Lifecycle of the process-wide model: set exactly once at startup,
/// read-only forever after. There is no reload path; an `Unavailable`
/// holder stays unavailable until the process restarts.
#[derive(Debug)]
pub enum ModelHolder {
    Loaded(LinearClassifier),
    Unavailable,
}

impl ModelHolder {
    /// Attempts to load the artifact at `path`.
    ///
    /// A missing or corrupt artifact is not fatal: the failure is
    /// logged and the holder comes back `Unavailable`, to be
    /// discovered by every prediction request.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(model) => {
                info!(
                    "loaded model '{}' from {:?} ({} classes, {} features)",
                    model.name(),
                    path,
                    model.num_classes(),
                    model.num_features()
                );
                Self::Loaded(model)
            }
            Err(e) => {
                warn!("model artifact unavailable at {:?}: {}", path, e);
                Self::Unavailable
            }
        }
    }

    fn try_load(path: &Path) -> Result<LinearClassifier, ModelError> {
        let text = fs::read_to_string(path)?;
        let model = LinearClassifier::from_json(&text)?;
        if model.num_features() != FeatureVector::DIM {
            return Err(ModelError::InvalidArtifact(format!(
                "artifact has {} input features, service expects {}",
                model.num_features(),
                FeatureVector::DIM
            )));
        }
        Ok(model)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn model(&self) -> Option<&LinearClassifier> {
        match self {
            Self::Loaded(model) => Some(model),
            Self::Unavailable => None,
        }
    }
}
