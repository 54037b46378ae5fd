//! Replicate adapter tests against a mocked predictions API.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nyambika_models::{Provider, TryOnRequest};
use nyambika_tryon::{ReplicateClient, ReplicateConfig, TryOnConfig, TryOnOrchestrator};

fn test_config(server_uri: &str) -> ReplicateConfig {
    ReplicateConfig {
        api_token: Some("test-token".to_string()),
        api_base: server_uri.to_string(),
        poll_interval: Duration::from_millis(10),
        max_wait: Duration::from_millis(150),
        ..ReplicateConfig::default()
    }
}

fn request() -> TryOnRequest {
    TryOnRequest {
        customer_image: "AAAA".to_string(),
        garment_image: "BBBB".to_string(),
        garment_type: "dress".to_string(),
        measurements: None,
    }
}

#[tokio::test]
async fn test_missing_token_fails_without_http_call() {
    let server = MockServer::start().await;
    // Any request reaching the server would trip this.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = TryOnConfig {
        provider: Provider::Replicate,
        replicate: ReplicateConfig {
            api_token: None,
            api_base: server.uri(),
            ..ReplicateConfig::default()
        },
        ..TryOnConfig::default()
    };

    let result = TryOnOrchestrator::new(config).generate(&request()).await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("REPLICATE_API_TOKEN is not set"));
    assert!(result.try_on_image_url.is_none());
}

#[tokio::test]
async fn test_array_output_uses_last_element() {
    let server = MockServer::start().await;
    let poll_url = format!("{}/v1/predictions/p1", server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "processing",
            "urls": { "get": poll_url }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/predictions/p1"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded",
            "output": ["url1", "url2"]
        })))
        .mount(&server)
        .await;

    let client = ReplicateClient::new(test_config(&server.uri()));
    let url = client.generate("AAAA", "BBBB").await.unwrap();
    assert_eq!(url, "url2");
}

#[tokio::test]
async fn test_scalar_output_on_immediate_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "succeeded",
            "urls": { "get": format!("{}/v1/predictions/p2", server.uri()) },
            "output": "https://replicate.delivery/final.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReplicateClient::new(test_config(&server.uri()));
    let url = client.generate("AAAA", "BBBB").await.unwrap();
    assert_eq!(url, "https://replicate.delivery/final.png");
}

#[tokio::test]
async fn test_stuck_prediction_times_out() {
    let server = MockServer::start().await;
    let poll_url = format!("{}/v1/predictions/p3", server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "processing",
            "urls": { "get": poll_url }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/predictions/p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "processing"
        })))
        .mount(&server)
        .await;

    let config = TryOnConfig {
        provider: Provider::Replicate,
        replicate: test_config(&server.uri()),
        ..TryOnConfig::default()
    };

    let result = TryOnOrchestrator::new(config).generate(&request()).await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Replicate prediction timed out"));
}

#[tokio::test]
async fn test_create_failure_surfaces_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(402).set_body_string("insufficient credit"))
        .mount(&server)
        .await;

    let client = ReplicateClient::new(test_config(&server.uri()));
    let err = client.generate("AAAA", "BBBB").await.unwrap_err();
    assert_eq!(err.to_string(), "Replicate create failed: insufficient credit");
}

#[tokio::test]
async fn test_provider_failure_uses_reported_error() {
    let server = MockServer::start().await;
    let poll_url = format!("{}/v1/predictions/p4", server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "processing",
            "urls": { "get": poll_url }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/predictions/p4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "error": "prediction was rejected"
        })))
        .mount(&server)
        .await;

    let client = ReplicateClient::new(test_config(&server.uri()));
    let err = client.generate("AAAA", "BBBB").await.unwrap_err();
    assert_eq!(err.to_string(), "prediction was rejected");
}
