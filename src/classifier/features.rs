use ndarray::Array1;

use super::error::PredictionError;

/// A validated iris feature vector.
///
/// The four measurements are ordered
/// [sepal length, sepal width, petal length, petal width], in
/// centimeters. Construction is the only way to obtain a value, so any
/// `FeatureVector` handed to the model is guaranteed to have exactly
/// [`FeatureVector::DIM`] finite entries.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    /// Input dimensionality the model was trained on.
    pub const DIM: usize = 4;

    /// Validates a raw slice into a feature vector.
    ///
    /// # Errors
    /// `MalformedInput` if the slice does not contain exactly
    /// [`FeatureVector::DIM`] values or any value is NaN/infinite.
    pub fn new(values: &[f64]) -> Result<Self, PredictionError> {
        if values.len() != Self::DIM {
            return Err(PredictionError::MalformedInput(format!(
                "expected {} features, got {}",
                Self::DIM,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(PredictionError::MalformedInput(format!(
                "features must be finite numbers, got {}",
                bad
            )));
        }
        Ok(Self {
            values: Array1::from_vec(values.to_vec()),
        })
    }

    pub(crate) fn values(&self) -> &Array1<f64> {
        &self.values
    }
}
