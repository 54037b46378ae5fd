//! Try-on provider selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Backend capable of producing a try-on image.
///
/// Selection is static and environment-driven (`TRYON_PROVIDER`); there is
/// no runtime failover between providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Replicate,
    #[serde(rename = "clothflow")]
    ClothFlow,
    /// OpenAI vision analysis + image generation. Also the fallback when
    /// `TRYON_PROVIDER` is unset or unrecognized.
    #[default]
    OpenAi,
}

impl Provider {
    /// Parse a provider name, case-insensitively.
    ///
    /// Unrecognized values fall back to [`Provider::OpenAi`] so the
    /// storefront keeps working without provider configuration; the
    /// fallback is logged because it usually means a typo in the env.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "replicate" => Self::Replicate,
            "clothflow" | "virtual_tryon" => Self::ClothFlow,
            "openai" | "" => Self::OpenAi,
            other => {
                warn!("Unrecognized TRYON_PROVIDER '{}', falling back to OpenAI", other);
                Self::OpenAi
            }
        }
    }

    /// Read the provider from `TRYON_PROVIDER`.
    pub fn from_env() -> Self {
        std::env::var("TRYON_PROVIDER")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Replicate => "replicate",
            Self::ClothFlow => "clothflow",
            Self::OpenAi => "openai",
        };
        write!(f, "{}", name)
    }
}
