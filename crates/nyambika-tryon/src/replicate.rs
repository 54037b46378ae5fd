//! Replicate provider adapter.
//!
//! Submits a prediction to a configurable try-on model, then polls the
//! returned status URL until it reaches a terminal state or the wall-clock
//! budget runs out.

use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ReplicateConfig;
use crate::error::{ProviderResult, TryOnError};
use crate::image;

/// Statuses during which the prediction is still running.
const PENDING_STATUSES: [&str; 3] = ["starting", "processing", "queued"];

/// Prediction creation request.
#[derive(Debug, Serialize)]
struct CreatePrediction<'a> {
    version: &'a str,
    input: PredictionInput,
}

/// Try-on models on Replicate disagree on input key names; sending the
/// common aliases keeps the model swappable via `TRYON_MODEL`.
#[derive(Debug, Serialize)]
struct PredictionInput {
    person_image: String,
    garment_image: String,
    human: String,
    cloth: String,
    seed: u32,
    num_inference_steps: u32,
    guidance_scale: f64,
}

/// Prediction state, shared by the creation and poll responses.
#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    urls: Option<PredictionUrls>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    #[serde(default)]
    get: Option<String>,
}

/// Client for the Replicate predictions API.
pub struct ReplicateClient {
    http: Client,
    config: ReplicateConfig,
}

impl ReplicateClient {
    /// Create a new client.
    pub fn new(config: ReplicateConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_http(http: Client, config: ReplicateConfig) -> Self {
        Self { http, config }
    }

    /// Generate a try-on image; returns the final output URL.
    pub async fn generate(&self, customer_image: &str, garment_image: &str) -> ProviderResult<String> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| TryOnError::config("REPLICATE_API_TOKEN is not set"))?;

        let person = image::to_raw_base64(&self.http, customer_image).await?;
        let cloth = image::to_raw_base64(&self.http, garment_image).await?;

        let input = PredictionInput {
            person_image: image::as_jpeg_data_url(&person),
            garment_image: image::as_jpeg_data_url(&cloth),
            human: image::as_jpeg_data_url(&person),
            cloth: image::as_jpeg_data_url(&cloth),
            seed: 42,
            num_inference_steps: 30,
            guidance_scale: 4.5,
        };

        let create_url = format!("{}/v1/predictions", self.config.api_base.trim_end_matches('/'));
        debug!("Creating Replicate prediction for model {}", self.config.model);

        let response = self
            .http
            .post(&create_url)
            .header(AUTHORIZATION, format!("Token {}", token))
            .json(&CreatePrediction {
                version: &self.config.model,
                input,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TryOnError::provider(format!("Replicate create failed: {}", body)));
        }

        let created: Prediction = response.json().await?;
        let poll_url = created
            .urls
            .as_ref()
            .and_then(|u| u.get.clone())
            .or_else(|| created.url.clone())
            .ok_or_else(|| TryOnError::invalid_response("Replicate did not return a prediction URL"))?;

        let mut status = created.status.unwrap_or_else(|| "queued".to_string());
        let mut output = created.output;
        let mut last_error = created.error;
        let started = Instant::now();

        while PENDING_STATUSES.contains(&status.as_str()) {
            if started.elapsed() > self.config.max_wait {
                return Err(TryOnError::Timeout("Replicate prediction timed out".to_string()));
            }
            tokio::time::sleep(self.config.poll_interval).await;

            let poll = self
                .http
                .get(&poll_url)
                .header(AUTHORIZATION, format!("Token {}", token))
                .send()
                .await?;
            if !poll.status().is_success() {
                warn!("Replicate poll returned {}, giving up", poll.status());
                break;
            }

            let prediction: Prediction = poll.json().await?;
            if let Some(s) = prediction.status {
                status = s;
            }
            if prediction.output.is_some() {
                output = prediction.output;
            }
            if prediction.error.is_some() {
                last_error = prediction.error;
            }
        }

        if status != "succeeded" {
            return Err(TryOnError::provider(
                last_error.unwrap_or_else(|| "Replicate prediction failed".to_string()),
            ));
        }

        // Some models stream intermediate frames; the last array element is
        // the final image.
        match output {
            Some(Value::Array(items)) => items
                .last()
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| TryOnError::invalid_response("Replicate output array held no URL")),
            Some(Value::String(url)) => Ok(url),
            _ => Err(TryOnError::invalid_response("Replicate returned no output URL")),
        }
    }
}
