use std::sync::Arc;
use std::thread;

use serde_json::json;

use irisd::{LabelMap, MetricsRegistry, ModelHolder, PredictionError, PredictionService};

const ARTIFACT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/iris-v1.json");

fn loaded_service() -> (PredictionService, Arc<MetricsRegistry>) {
    let holder = Arc::new(ModelHolder::load(ARTIFACT));
    assert!(holder.is_loaded(), "shipped artifact should load");
    let metrics = Arc::new(MetricsRegistry::new());
    let service = PredictionService::new(holder, LabelMap::iris(), Arc::clone(&metrics));
    (service, metrics)
}

fn unavailable_service() -> (PredictionService, Arc<MetricsRegistry>) {
    let metrics = Arc::new(MetricsRegistry::new());
    let service = PredictionService::new(
        Arc::new(ModelHolder::Unavailable),
        LabelMap::iris(),
        Arc::clone(&metrics),
    );
    (service, metrics)
}

#[test]
fn canonical_example_is_virginica() {
    let (service, metrics) = loaded_service();

    let prediction = service
        .predict(&json!({ "features": [6.8, 2.8, 4.5, 0.7] }))
        .unwrap();

    assert_eq!(prediction.class_index, 2);
    assert_eq!(prediction.species, "virginica");
    assert_eq!(metrics.count("virginica"), 1);
}

#[test]
fn classifies_textbook_specimens() {
    let (service, _) = loaded_service();

    let cases = [
        ([5.1, 3.5, 1.4, 0.2], 0, "setosa"),
        ([4.6, 3.1, 1.5, 0.2], 0, "setosa"),
        ([6.0, 2.7, 4.2, 1.3], 1, "versicolor"),
        ([5.5, 2.4, 3.7, 1.0], 1, "versicolor"),
        ([6.3, 3.3, 6.0, 2.5], 2, "virginica"),
        ([7.7, 3.8, 6.7, 2.2], 2, "virginica"),
    ];
    for (features, index, species) in cases {
        let prediction = service.predict_vector(&features).unwrap();
        assert_eq!(prediction.class_index, index, "features {:?}", features);
        assert_eq!(prediction.species, species, "features {:?}", features);
    }
}

#[test]
fn valid_vectors_always_land_in_range() {
    let (service, metrics) = loaded_service();

    let inputs = [
        [4.3, 2.0, 1.0, 0.1],
        [7.9, 4.4, 6.9, 2.5],
        [5.8, 3.0, 4.0, 1.2],
        [0.0, 0.0, 0.0, 0.0],
    ];
    for features in inputs {
        let prediction = service.predict_vector(&features).unwrap();
        assert!(prediction.class_index < 3);
        assert_ne!(prediction.species, LabelMap::UNKNOWN);
    }
    let total: u64 = metrics.snapshot().values().sum();
    assert_eq!(total, inputs.len() as u64);
}

#[test]
fn malformed_payloads_are_rejected_without_side_effects() {
    let (service, metrics) = loaded_service();

    let payloads = [
        json!({}),
        json!({ "features": [1, 2] }),
        json!({ "features": [1, 2, 3, 4, 5] }),
        json!({ "features": "not a list" }),
        json!({ "features": [1, "two", 3, 4] }),
        json!({ "measurements": [6.8, 2.8, 4.5, 0.7] }),
    ];
    for payload in payloads {
        let err = service.predict(&payload).unwrap_err();
        assert!(
            matches!(err, PredictionError::MalformedInput(_)),
            "payload {} gave {:?}",
            payload,
            err
        );
    }
    assert!(metrics.snapshot().is_empty());
}

#[test]
fn non_finite_vectors_are_malformed() {
    let (service, metrics) = loaded_service();

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = service.predict_vector(&[6.8, bad, 4.5, 0.7]).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedInput(_)));
    }
    assert!(metrics.snapshot().is_empty());
}

#[test]
fn unavailable_model_answers_consistently() {
    let (service, metrics) = unavailable_service();

    for _ in 0..5 {
        let err = service
            .predict(&json!({ "features": [6.8, 2.8, 4.5, 0.7] }))
            .unwrap_err();
        assert!(matches!(err, PredictionError::ServiceUnavailable));
    }
    assert!(metrics.snapshot().is_empty());
}

#[test]
fn input_validation_runs_before_the_model_check() {
    // Wrong-length input is the client's fault even while the model
    // is down.
    let (service, _) = unavailable_service();

    let err = service.predict(&json!({ "features": [1, 2] })).unwrap_err();
    assert!(matches!(err, PredictionError::MalformedInput(_)));
}

#[test]
fn concurrent_predictions_lose_no_counts() {
    let (service, metrics) = loaded_service();
    let service = Arc::new(service);

    let threads: u64 = 8;
    let per_thread: u64 = 50;
    let mut handles = vec![];
    for _ in 0..threads {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            for _ in 0..per_thread {
                let prediction = service.predict_vector(&[6.3, 3.3, 6.0, 2.5]).unwrap();
                assert_eq!(prediction.species, "virginica");
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(metrics.count("virginica"), threads * per_thread);
    assert_eq!(metrics.snapshot().len(), 1);
}

#[test]
fn counter_totals_never_decrease() {
    let (service, metrics) = loaded_service();

    let mut last_total = 0;
    for _ in 0..10 {
        service.predict_vector(&[5.1, 3.5, 1.4, 0.2]).unwrap();
        let total: u64 = metrics.snapshot().values().sum();
        assert!(total > last_total);
        last_total = total;
    }
}

#[test]
fn out_of_range_class_index_resolves_to_unknown() {
    // A label map narrower than the model's class count exercises the
    // "unknown" fallback end to end.
    let holder = Arc::new(ModelHolder::load(ARTIFACT));
    let metrics = Arc::new(MetricsRegistry::new());
    let service = PredictionService::new(
        holder,
        LabelMap::new(["setosa"]),
        Arc::clone(&metrics),
    );

    let prediction = service.predict_vector(&[6.3, 3.3, 6.0, 2.5]).unwrap();
    assert_eq!(prediction.class_index, 2);
    assert_eq!(prediction.species, LabelMap::UNKNOWN);
    assert_eq!(metrics.count(LabelMap::UNKNOWN), 1);
}
