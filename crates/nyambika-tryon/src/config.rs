//! Provider configuration.
//!
//! Every adapter reads its settings from environment variables with
//! defaults that match the deployed service. Base URLs and timings are
//! plain fields so tests can point an adapter at a mock server.

use std::time::Duration;

use nyambika_models::Provider;

/// Replicate adapter configuration.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// API token (`REPLICATE_API_TOKEN`); the adapter fails fast when absent
    pub api_token: Option<String>,
    /// Model or version identifier submitted with the prediction
    pub model: String,
    /// API base URL
    pub api_base: String,
    /// Delay between status polls
    pub poll_interval: Duration,
    /// Wall-clock budget for the whole prediction
    pub max_wait: Duration,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            model: "xiong-pku/tryondiffusion".to_string(),
            api_base: "https://api.replicate.com".to_string(),
            poll_interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(90),
        }
    }
}

impl ReplicateConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var("REPLICATE_API_TOKEN").ok().filter(|t| !t.is_empty()),
            model: std::env::var("TRYON_MODEL")
                .unwrap_or_else(|_| "xiong-pku/tryondiffusion".to_string()),
            api_base: std::env::var("REPLICATE_API_URL")
                .unwrap_or_else(|_| "https://api.replicate.com".to_string()),
            ..Self::default()
        }
    }
}

/// ClothFlow microservice configuration.
#[derive(Debug, Clone)]
pub struct ClothFlowConfig {
    /// Base URL of the self-hosted service (`CLOTHFLOW_URL`)
    pub base_url: String,
}

impl Default for ClothFlowConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

impl ClothFlowConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CLOTHFLOW_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        }
    }
}

/// OpenAI adapter configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (`OPENAI_API_KEY`); demo fallback kicks in when absent
    pub api_key: Option<String>,
    /// API base URL
    pub api_base: String,
    /// Serve mocked results instead of calling OpenAI (`DEMO_TRYON_FALLBACK`)
    pub demo_fallback: bool,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com".to_string(),
            demo_fallback: false,
        }
    }
}

impl OpenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            api_base: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            demo_fallback: std::env::var("DEMO_TRYON_FALLBACK")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }
}

/// Full orchestrator configuration: selected provider plus adapter settings.
#[derive(Debug, Clone, Default)]
pub struct TryOnConfig {
    pub provider: Provider,
    pub replicate: ReplicateConfig,
    pub clothflow: ClothFlowConfig,
    pub openai: OpenAiConfig,
}

impl TryOnConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            provider: Provider::from_env(),
            replicate: ReplicateConfig::from_env(),
            clothflow: ClothFlowConfig::from_env(),
            openai: OpenAiConfig::from_env(),
        }
    }
}
