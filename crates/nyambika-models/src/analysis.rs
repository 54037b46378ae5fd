//! Fashion analysis and size recommendation models.

use serde::{Deserialize, Serialize};

/// Categorization of a garment photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FashionAnalysis {
    /// Garment category, e.g. "dresses", "shirts"
    #[serde(default)]
    pub category: String,
    /// Dominant colors
    #[serde(default)]
    pub colors: Vec<String>,
    /// Style descriptor, e.g. "casual", "formal"
    #[serde(default)]
    pub style: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Search/browse tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Size recommendation from measurements against a product's size chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendation {
    pub recommended_size: String,
    /// Confidence in [0, 1]
    #[serde(default)]
    pub confidence: f64,
    /// Next-best sizes, in preference order
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub notes: String,
}
