//! HTTP presentation layer: axum router, handlers, and the mapping
//! from core prediction errors to HTTP statuses.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
