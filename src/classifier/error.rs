use std::io;
use thiserror::Error;

/// Errors raised while loading or validating a model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("artifact parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
}

/// Errors a single prediction request can fail with.
///
/// Every variant is terminal for its request and never retried by the
/// service. `MalformedInput` is detected before the model is touched;
/// `ServiceUnavailable` is deterministic for the process lifetime once
/// the artifact failed to load; `ClassificationFailure` is a model
/// fault surfaced as a result instead of a panic.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The payload is missing the feature field, has the wrong shape,
    /// or contains non-numeric/non-finite values.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The model artifact never loaded; only a restart can clear this.
    #[error("model not loaded")]
    ServiceUnavailable,
    /// The model produced an unusable result (e.g. a non-finite score).
    #[error("classification failed: {0}")]
    ClassificationFailure(String),
}
