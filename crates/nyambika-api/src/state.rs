//! Application state.

use std::sync::Arc;

use nyambika_tryon::TryOnOrchestrator;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub orchestrator: Arc<TryOnOrchestrator>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            orchestrator: Arc::new(TryOnOrchestrator::from_env()),
        }
    }

    /// Create state with a preconfigured orchestrator (used by tests).
    pub fn with_orchestrator(config: ApiConfig, orchestrator: TryOnOrchestrator) -> Self {
        Self {
            config,
            orchestrator: Arc::new(orchestrator),
        }
    }
}
