//! Shared data models for the Nyambika try-on backend.
//!
//! This crate provides Serde-serializable types for:
//! - Try-on requests and results
//! - Fit recommendations and body measurements
//! - Provider selection
//! - Fashion analysis and size recommendation payloads

pub mod analysis;
pub mod provider;
pub mod tryon;

// Re-export common types
pub use analysis::{FashionAnalysis, SizeRecommendation};
pub use provider::Provider;
pub use tryon::{Fit, FitRecommendation, Measurements, TryOnRequest, TryOnResult};
