//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inference API
        .route("/predict", post(handlers::predict))
        // Metrics exposition
        .route("/metrics", get(handlers::metrics))
        // Health and readiness
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        // Attach state
        .with_state(state)
}
