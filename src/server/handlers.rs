//! Request handlers for the inference API.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use log::info;
use serde::Serialize;
use serde_json::Value;

use crate::server::{error::ApiError, state::AppState};

/// Prediction response body, mirroring the upstream dashboard's
/// expectations: the raw class index plus the resolved species name.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Model class index
    pub prediction: usize,
    /// Resolved species name
    pub species: String,
}

/// Handle a prediction request.
///
/// The body is taken as a raw JSON value so that shape problems reach
/// the service's validation step and come back as structured
/// `malformed_input` errors rather than framework rejections.
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let prediction = state.service.predict(&payload)?;
    info!(
        "prediction served: class {} ({})",
        prediction.class_index, prediction.species
    );
    Ok(Json(PredictResponse {
        prediction: prediction.class_index,
        species: prediction.species,
    }))
}

/// Prometheus text exposition of the per-species counters, rendered
/// from a point-in-time registry snapshot.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let mut output = String::from(
        "# HELP iris_predictions_total Number of iris predictions served, by species\n\
         # TYPE iris_predictions_total counter\n",
    );
    for (species, count) in state.metrics.snapshot() {
        output.push_str(&format!(
            "iris_predictions_total{{species=\"{}\"}} {}\n",
            species, count
        ));
    }

    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        output,
    )
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Liveness: the process is up, model or not.
pub async fn health(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        model_loaded: state.holder.is_loaded(),
    })
}

/// Readiness: only ready once the model artifact is loaded.
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    if state.holder.is_loaded() {
        Ok(Json(StatusResponse {
            status: "ready",
            model_loaded: true,
        }))
    } else {
        Err(ApiError::ServiceUnavailable("model not loaded".into()))
    }
}
