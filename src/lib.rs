//! A small iris species inference service: one pre-trained classifier
//! served over HTTP, with per-species prediction counters.
//!
//! The library half is the inference core (model lifecycle, input
//! validation, label resolution, metrics); the binary wires it to an
//! axum server exposing `POST /predict` and a Prometheus-style
//! `GET /metrics`.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use irisd::{LabelMap, LinearClassifier, MetricsRegistry, ModelHolder, PredictionService};
//!
//! let model = LinearClassifier::from_parts(
//!     "iris-logreg",
//!     vec![
//!         vec![1.8755, 6.1845, -7.3587, -2.0525],
//!         vec![0.5321, 2.6610, -5.0630, 6.1394],
//!         vec![-2.4076, -8.8454, 12.4217, -4.0869],
//!     ],
//!     vec![1.3810, 7.6544, -9.0355],
//! )?;
//!
//! let metrics = Arc::new(MetricsRegistry::new());
//! let service = PredictionService::new(
//!     Arc::new(ModelHolder::Loaded(model)),
//!     LabelMap::iris(),
//!     Arc::clone(&metrics),
//! );
//!
//! let prediction = service.predict_vector(&[5.1, 3.5, 1.4, 0.2])?;
//! assert_eq!(prediction.species, "setosa");
//! assert_eq!(metrics.count("setosa"), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The service is thread-safe and can be shared across threads using
//! `Arc`; the loaded model is immutable and the counters synchronize
//! their own updates:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use std::thread;
//! use irisd::{LabelMap, LinearClassifier, MetricsRegistry, ModelHolder, PredictionService};
//!
//! # let model = LinearClassifier::from_parts(
//! #     "iris-logreg",
//! #     vec![
//! #         vec![1.8755, 6.1845, -7.3587, -2.0525],
//! #         vec![0.5321, 2.6610, -5.0630, 6.1394],
//! #         vec![-2.4076, -8.8454, 12.4217, -4.0869],
//! #     ],
//! #     vec![1.3810, 7.6544, -9.0355],
//! # )?;
//! let service = Arc::new(PredictionService::new(
//!     Arc::new(ModelHolder::Loaded(model)),
//!     LabelMap::iris(),
//!     Arc::new(MetricsRegistry::new()),
//! ));
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let service = Arc::clone(&service);
//!     handles.push(thread::spawn(move || {
//!         service.predict_vector(&[6.3, 3.3, 6.0, 2.5]).unwrap();
//!     }));
//! }
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod metrics;
pub mod server;

pub use classifier::{
    FeatureVector, LabelMap, LinearClassifier, ModelError, ModelHolder, Prediction,
    PredictionError, PredictionService,
};
pub use metrics::MetricsRegistry;
pub use server::{create_router, AppState};

pub fn init_logger() {
    env_logger::init();
}
