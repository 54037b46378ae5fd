//! Provider selection and the exception-safe orchestration boundary.

use reqwest::Client;
use tracing::{info, warn};

use nyambika_models::{FashionAnalysis, Measurements, Provider, SizeRecommendation, TryOnRequest, TryOnResult};

use crate::clothflow::ClothFlowClient;
use crate::config::TryOnConfig;
use crate::error::ProviderResult;
use crate::openai::OpenAiClient;
use crate::replicate::ReplicateClient;

/// Entry point for try-on generation.
///
/// Selection is static: the configured provider handles the request, and
/// its failure is the caller's answer. There is no cross-provider retry.
pub struct TryOnOrchestrator {
    config: TryOnConfig,
    http: Client,
}

impl TryOnOrchestrator {
    /// Create a new orchestrator.
    pub fn new(config: TryOnConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(TryOnConfig::from_env())
    }

    /// The configured provider.
    pub fn provider(&self) -> Provider {
        self.effective_provider()
    }

    /// Generate a try-on result.
    ///
    /// This boundary never fails: adapter errors come back as
    /// `TryOnResult { success: false, error }`, so callers need no
    /// error handling around the call.
    pub async fn generate(&self, request: &TryOnRequest) -> TryOnResult {
        let provider = self.effective_provider();
        info!("Generating try-on via {} provider", provider);

        let outcome = self.dispatch(provider, request).await;
        match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Try-on generation failed via {}: {}", provider, e);
                TryOnResult::failure(e.to_string())
            }
        }
    }

    /// Categorize a garment photo (OpenAI-backed, provider-independent).
    pub async fn analyze_fashion_image(&self, image: &str) -> ProviderResult<FashionAnalysis> {
        self.openai_client().analyze_fashion_image(image).await
    }

    /// Recommend a size from measurements (OpenAI-backed, provider-independent).
    pub async fn recommend_size(
        &self,
        measurements: &Measurements,
        product_type: &str,
        product_sizes: &[String],
    ) -> ProviderResult<SizeRecommendation> {
        self.openai_client()
            .recommend_size(measurements, product_type, product_sizes)
            .await
    }

    /// Resolve the provider actually used for this configuration.
    ///
    /// ClothFlow without a base URL falls through to OpenAI. Replicate is
    /// honored even without a token so the missing-token error reaches the
    /// caller instead of silently switching providers.
    fn effective_provider(&self) -> Provider {
        match self.config.provider {
            Provider::ClothFlow if self.config.clothflow.base_url.is_empty() => Provider::OpenAi,
            provider => provider,
        }
    }

    async fn dispatch(&self, provider: Provider, request: &TryOnRequest) -> ProviderResult<TryOnResult> {
        match provider {
            Provider::ClothFlow => {
                let client =
                    ClothFlowClient::with_http(self.http.clone(), self.config.clothflow.clone());
                let url = client
                    .generate(&request.customer_image, &request.garment_image)
                    .await?;
                // No analysis stage on this path, so no recommendations.
                Ok(TryOnResult::ok(url, None))
            }
            Provider::Replicate => {
                let client =
                    ReplicateClient::with_http(self.http.clone(), self.config.replicate.clone());
                let url = client
                    .generate(&request.customer_image, &request.garment_image)
                    .await?;
                Ok(TryOnResult::ok(url, None))
            }
            Provider::OpenAi => {
                self.openai_client()
                    .generate_try_on(
                        &request.customer_image,
                        &request.garment_image,
                        &request.garment_type,
                        request.measurements.as_ref(),
                    )
                    .await
            }
        }
    }

    fn openai_client(&self) -> OpenAiClient {
        OpenAiClient::with_http(self.http.clone(), self.config.openai.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClothFlowConfig;

    #[test]
    fn test_clothflow_without_base_url_falls_back_to_openai() {
        let config = TryOnConfig {
            provider: Provider::ClothFlow,
            clothflow: ClothFlowConfig {
                base_url: String::new(),
            },
            ..TryOnConfig::default()
        };
        assert_eq!(TryOnOrchestrator::new(config).provider(), Provider::OpenAi);
    }

    #[test]
    fn test_replicate_selection_is_honored_without_token() {
        let config = TryOnConfig {
            provider: Provider::Replicate,
            ..TryOnConfig::default()
        };
        assert_eq!(TryOnOrchestrator::new(config).provider(), Provider::Replicate);
    }
}
