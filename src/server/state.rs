//! Application state shared across handlers

use std::sync::Arc;

use crate::classifier::{LabelMap, ModelHolder, PredictionService};
use crate::metrics::MetricsRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Prediction service orchestrating the inference path
    pub service: Arc<PredictionService>,
    /// Prediction counters, also read by the metrics handler
    pub metrics: Arc<MetricsRegistry>,
    /// Model lifecycle, read by the readiness handler
    pub holder: Arc<ModelHolder>,
}

impl AppState {
    pub fn new(holder: Arc<ModelHolder>, labels: LabelMap, metrics: Arc<MetricsRegistry>) -> Self {
        let service = PredictionService::new(Arc::clone(&holder), labels, Arc::clone(&metrics));
        Self {
            service: Arc::new(service),
            metrics,
            holder,
        }
    }
}
