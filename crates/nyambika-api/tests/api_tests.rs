//! API integration tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use nyambika_api::{create_router, ApiConfig, AppState};
use nyambika_tryon::{TryOnConfig, TryOnOrchestrator};

/// Router backed by the OpenAI demo fallback (no API key configured), so
/// try-on requests complete without any network access.
fn test_app() -> axum::Router {
    let state = AppState::with_orchestrator(
        ApiConfig::default(),
        TryOnOrchestrator::new(TryOnConfig::default()),
    );
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider"], "openai");
}

#[tokio::test]
async fn test_try_on_rejects_empty_images() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/try-on")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "customerImage": "",
                "garmentImage": "BBBB",
                "garmentType": "dress"
            })
            .to_string(),
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn test_try_on_returns_result_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/try-on")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "customerImage": "AAAA",
                "garmentImage": "BBBB",
                "garmentType": "dress"
            })
            .to_string(),
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Demo fallback: success with the customer photo echoed as a data URL.
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["tryOnImageUrl"], "data:image/jpeg;base64,AAAA");
    assert_eq!(body["recommendations"]["fit"], "perfect");
}

#[tokio::test]
async fn test_size_recommendation_rejects_empty_size_list() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/size-recommendation")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "measurements": { "height": 170.0 },
                "productType": "shirt",
                "productSizes": []
            })
            .to_string(),
        ))
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
