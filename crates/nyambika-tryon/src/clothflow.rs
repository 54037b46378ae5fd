//! ClothFlow provider adapter.
//!
//! Client for the self-hosted ClothFlow microservice: one POST to `/tryon`
//! with both images as data URLs, no polling.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClothFlowConfig;
use crate::error::{ProviderResult, TryOnError};
use crate::image;

#[derive(Debug, Serialize)]
struct TryOnServiceRequest {
    person: String,
    cloth: String,
}

/// The service populates one of several fields depending on its version.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TryOnServiceResponse {
    #[serde(default)]
    try_on_image_base64: Option<String>,
    #[serde(default)]
    try_on_image_url: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Client for the ClothFlow try-on service.
pub struct ClothFlowClient {
    http: Client,
    config: ClothFlowConfig,
}

impl ClothFlowClient {
    /// Create a new client.
    pub fn new(config: ClothFlowConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_http(http: Client, config: ClothFlowConfig) -> Self {
        Self { http, config }
    }

    /// Generate a try-on image; returns a directly renderable URL
    /// (remote URL or data URL).
    pub async fn generate(&self, customer_image: &str, garment_image: &str) -> ProviderResult<String> {
        // Reject empty inputs before touching the network.
        if customer_image.is_empty() || garment_image.is_empty() {
            return Err(TryOnError::validation(format!(
                "Missing inputs for ClothFlow: person={}, cloth={}",
                !customer_image.is_empty(),
                !garment_image.is_empty()
            )));
        }

        let person = image::to_clothflow_input(&self.http, customer_image).await?;
        let cloth = image::to_clothflow_input(&self.http, garment_image).await?;

        let url = format!("{}/tryon", self.config.base_url.trim_end_matches('/'));
        debug!("Sending try-on request to {}", url);

        let response = self
            .http
            .post(&url)
            .json(&TryOnServiceRequest { person, cloth })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body
            };
            return Err(TryOnError::provider(format!(
                "ClothFlow error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let data: TryOnServiceResponse = response.json().await?;

        // Inline base64 takes precedence; re-prefix it so the caller always
        // receives something renderable.
        if let Some(base64) = data.try_on_image_base64 {
            if image::is_data_url(&base64) {
                return Ok(base64);
            }
            return Ok(image::as_jpeg_data_url(&base64));
        }

        data.try_on_image_url
            .or(data.output)
            .or(data.url)
            .ok_or_else(|| TryOnError::invalid_response("ClothFlow returned no image"))
    }
}
