//! Integration tests for HTTP-served models.
//!
//! A mock inference server (`httptest`) stands in for the real endpoints, so
//! these tests make no external network requests.

use std::sync::Arc;
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

use phishscore::models::query_model;
use phishscore::{
    EnsemblePredictor, FeatureExtractor, ModelOutcome, ModelSource, PayloadMode, PhishingModel,
    PredictorConfig, ReferenceData, RemoteModel,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn remote(server: &Server, source: ModelSource) -> RemoteModel {
    let endpoint = server.url_str("/predict").parse().unwrap();
    RemoteModel::new(source, endpoint, reqwest::Client::new())
}

#[tokio::test]
async fn test_url_payload_reads_probability() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/predict"),
            request::body(json_decoded(eq(json!({"url": "http://example.com/login"})))),
        ])
        .respond_with(json_encoded(json!({"phishing_probability": 0.73}))),
    );

    let model = remote(&server, ModelSource::Electra);
    let probability = model
        .phishing_probability("http://example.com/login")
        .await
        .unwrap();
    assert_eq!(probability, 0.73);
}

#[tokio::test]
async fn test_features_payload_sends_numeric_vector() {
    let url = "http://192.168.1.1/login";
    let vector = FeatureExtractor::default().numeric_vector(url);

    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/predict"),
            request::body(json_decoded(eq(json!({"url": url, "features": vector.to_vec()})))),
        ])
        .respond_with(json_encoded(json!({"phishing_probability": 0.91}))),
    );

    let model = remote(&server, ModelSource::Lgbm).with_payload(PayloadMode::Features);
    assert_eq!(model.phishing_probability(url).await.unwrap(), 0.91);
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/predict"))
            .respond_with(status_code(503)),
    );

    let model = remote(&server, ModelSource::Biformer);
    let outcome = query_model(&model, "http://example.com", TIMEOUT).await;
    assert!(matches!(outcome, ModelOutcome::Unavailable { .. }));
}

#[tokio::test]
async fn test_malformed_body_is_unavailable() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/predict"))
            .respond_with(status_code(200).body("not json")),
    );

    let model = remote(&server, ModelSource::Electra);
    let outcome = query_model(&model, "http://example.com", TIMEOUT).await;
    match outcome {
        ModelOutcome::Unavailable { reason } => assert!(reason.contains("Invalid model response")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_out_of_range_response_is_unavailable() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/predict"))
            .respond_with(json_encoded(json!({"phishing_probability": 1.8}))),
    );

    let model = remote(&server, ModelSource::Electra);
    let outcome = query_model(&model, "http://example.com", TIMEOUT).await;
    assert_eq!(outcome.probability(), None);
}

#[tokio::test]
async fn test_predictor_fuses_remote_models() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/predict"))
            .times(2)
            .respond_with(json_encoded(json!({"phishing_probability": 0.5}))),
    );

    let predictor = EnsemblePredictor::new(PredictorConfig::default(), ReferenceData::default())
        .unwrap()
        .with_model(Arc::new(remote(&server, ModelSource::Electra)))
        .with_model(Arc::new(
            remote(&server, ModelSource::Lgbm).with_payload(PayloadMode::Features),
        ));

    let prediction = predictor.predict("http://example.com").await;
    assert_eq!(prediction.model_predictions.len(), 2);
    assert_eq!(prediction.electra_probability, 0.5);
    assert_eq!(prediction.lgbm_probability, 0.5);
    assert_eq!(prediction.biformer_probability, 0.0);
    // 0.5 dampened by a trust score of 0.35
    assert!((prediction.phishing_probability - 0.4475).abs() < 1e-6);
}
