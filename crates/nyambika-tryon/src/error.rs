//! Try-on error types.

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, TryOnError>;

/// Errors surfaced by the provider adapters.
///
/// The orchestration boundary never propagates these: [`crate::TryOnOrchestrator::generate`]
/// converts them into a failed `TryOnResult`. Messages are therefore written
/// to be shown to the caller as-is.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// Missing API token or base URL; no network call was attempted.
    #[error("{0}")]
    Config(String),

    /// Inputs were empty or malformed after normalization.
    #[error("{0}")]
    Validation(String),

    /// Fetching a caller-supplied image URL failed.
    #[error("{0}")]
    Fetch(String),

    /// The provider reported a failure or returned a non-success status.
    #[error("{0}")]
    Provider(String),

    /// Polling exceeded the wall-clock budget.
    #[error("{0}")]
    Timeout(String),

    /// The provider response was missing expected fields.
    #[error("{0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TryOnError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
