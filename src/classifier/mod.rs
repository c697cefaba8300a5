//! The inference-serving core: feature validation, the model
//! lifecycle, species label resolution, and the prediction service
//! that ties them to the metrics registry.

pub mod error;
mod features;
mod labels;
mod model;
mod service;

pub use error::{ModelError, PredictionError};
pub use features::FeatureVector;
pub use labels::LabelMap;
pub use model::{LinearClassifier, ModelHolder};
pub use service::{Prediction, PredictionService};
