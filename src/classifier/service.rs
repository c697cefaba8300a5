use std::sync::Arc;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::error::PredictionError;
use super::features::FeatureVector;
use super::labels::LabelMap;
use super::model::ModelHolder;
use crate::metrics::MetricsRegistry;

/// Outcome of one successful prediction. Not persisted anywhere; the
/// only durable trace of a request is the per-species counter.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub class_index: usize,
    pub species: String,
}

/// Orchestrates the inference path: validate the payload, check the
/// model is loaded, classify once, resolve the species name, and bump
/// the per-species counter before handing the result back.
///
/// # Thread Safety
///
/// The service is `Send + Sync`: the model holder is immutable and
/// shared through an `Arc`, the label map is read-only, and the
/// metrics registry synchronizes its own updates. Concurrent requests
/// never block on each other outside the registry's counter lock.
#[derive(Debug)]
pub struct PredictionService {
    holder: Arc<ModelHolder>,
    labels: LabelMap,
    metrics: Arc<MetricsRegistry>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<PredictionService>();
    }
};

impl PredictionService {
    /// Creates a service over an already-loaded (or unavailable) model
    /// holder. The registry is injected rather than global so tests
    /// and embedders can own their own counters.
    pub fn new(holder: Arc<ModelHolder>, labels: LabelMap, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            holder,
            labels,
            metrics,
        }
    }

    /// Runs a prediction from a raw JSON payload.
    ///
    /// The payload must carry a `features` field holding a sequence of
    /// numbers. Validation is fail-fast and ordered: payload shape,
    /// then vector length/finiteness, then model availability. The
    /// counter increments only on a successful classification, exactly
    /// once, before this method returns.
    ///
    /// # Errors
    /// * `MalformedInput` — missing/mis-shaped `features` field, wrong
    ///   length, or non-numeric/non-finite entries.
    /// * `ServiceUnavailable` — the model artifact never loaded.
    /// * `ClassificationFailure` — the model produced an unusable
    ///   score; reported, never allowed to unwind through the caller.
    pub fn predict(&self, payload: &Value) -> Result<Prediction, PredictionError> {
        let features = extract_features(payload)?;
        self.predict_vector(&features)
    }

    /// Typed entry point for callers that already hold a numeric
    /// vector; same semantics as [`predict`](Self::predict) minus the
    /// payload-shape check.
    pub fn predict_vector(&self, features: &[f64]) -> Result<Prediction, PredictionError> {
        let vector = FeatureVector::new(features)?;
        let model = self
            .holder
            .model()
            .ok_or(PredictionError::ServiceUnavailable)?;

        let class_index = model.classify(&vector)?;
        let species = self.labels.resolve(class_index).to_string();
        self.metrics.increment(&species);
        debug!("classified {:?} as {} ({})", features, species, class_index);

        Ok(Prediction {
            class_index,
            species,
        })
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}

fn extract_features(payload: &Value) -> Result<Vec<f64>, PredictionError> {
    let entries = payload
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            PredictionError::MalformedInput(
                "payload must contain a \"features\" array of numbers".into(),
            )
        })?;

    entries
        .iter()
        .map(|entry| {
            entry.as_f64().ok_or_else(|| {
                PredictionError::MalformedInput(format!("non-numeric feature value: {}", entry))
            })
        })
        .collect()
}
