//! Request handlers.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use nyambika_models::{FashionAnalysis, Measurements, SizeRecommendation, TryOnRequest, TryOnResult};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.orchestrator.provider().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Generate a try-on visualization.
///
/// Returns 200 with the orchestrator's result either way; provider failures
/// are reported through the `success`/`error` fields of the body, which is
/// what the storefront renders.
pub async fn try_on(
    State(state): State<AppState>,
    Json(request): Json<TryOnRequest>,
) -> ApiResult<Json<TryOnResult>> {
    if request.customer_image.is_empty() || request.garment_image.is_empty() {
        return Err(ApiError::bad_request(
            "customerImage and garmentImage are required",
        ));
    }

    info!("Try-on request for garment type '{}'", request.garment_type);
    let result = state.orchestrator.generate(&request).await;
    Ok(Json(result))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FashionAnalysisRequest {
    pub image: String,
}

/// Categorize a garment photo.
pub async fn fashion_analysis(
    State(state): State<AppState>,
    Json(request): Json<FashionAnalysisRequest>,
) -> ApiResult<Json<FashionAnalysis>> {
    if request.image.is_empty() {
        return Err(ApiError::bad_request("image is required"));
    }

    let analysis = state.orchestrator.analyze_fashion_image(&request.image).await?;
    Ok(Json(analysis))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendationRequest {
    pub measurements: Measurements,
    pub product_type: String,
    pub product_sizes: Vec<String>,
}

/// Recommend a size from measurements and the product's available sizes.
pub async fn size_recommendation(
    State(state): State<AppState>,
    Json(request): Json<SizeRecommendationRequest>,
) -> ApiResult<Json<SizeRecommendation>> {
    if request.product_sizes.is_empty() {
        return Err(ApiError::bad_request("productSizes must not be empty"));
    }

    let recommendation = state
        .orchestrator
        .recommend_size(&request.measurements, &request.product_type, &request.product_sizes)
        .await?;
    Ok(Json(recommendation))
}
