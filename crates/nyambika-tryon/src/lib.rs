//! AI virtual try-on orchestration.
//!
//! This crate provides:
//! - Image normalization for the three accepted input encodings
//!   (http(s) URL, data URL, raw base64)
//! - Provider adapters: Replicate, ClothFlow, OpenAI
//! - A single orchestrator that selects a provider from configuration and
//!   always returns a well-formed [`TryOnResult`](nyambika_models::TryOnResult)

pub mod clothflow;
pub mod config;
pub mod error;
pub mod image;
pub mod openai;
pub mod orchestrator;
pub mod replicate;

pub use clothflow::ClothFlowClient;
pub use config::{ClothFlowConfig, OpenAiConfig, ReplicateConfig, TryOnConfig};
pub use error::{ProviderResult, TryOnError};
pub use openai::OpenAiClient;
pub use orchestrator::TryOnOrchestrator;
pub use replicate::ReplicateClient;
