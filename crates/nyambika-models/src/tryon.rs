//! Try-on request/result models.
//!
//! These types form the wire contract between the storefront and the
//! orchestration layer. Field names are camelCase on the wire to match
//! the existing client code.

use serde::{Deserialize, Serialize};

/// Optional customer body measurements, in centimeters/kilograms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_circumference: Option<f64>,
}

/// A single try-on session request: one customer photo paired with one
/// garment photo.
///
/// Both images accept any of three encodings: an http(s) URL, a
/// `data:image/...;base64,` URL, or raw base64. Normalization happens at
/// the adapter boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest {
    /// Customer photo (URL, data URL, or raw base64)
    pub customer_image: String,
    /// Garment photo (same encodings)
    pub garment_image: String,
    /// Garment type, e.g. "dress", "shirt"
    pub garment_type: String,
    /// Optional body measurements for size analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Measurements>,
}

/// Fit quality reported by the analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    #[default]
    Perfect,
    Loose,
    Tight,
}

/// Structured fit metadata derived from visual analysis.
///
/// On the OpenAI analysis path every field is populated, falling back to
/// defaults when the model omits one. Other providers do not produce
/// recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitRecommendation {
    pub fit: Fit,
    /// Confidence in [0, 1]
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_size: Option<String>,
    pub notes: String,
}

/// Result of a try-on session.
///
/// Exactly one of `try_on_image_url` (on success) or `error` (on failure)
/// is populated; use [`TryOnResult::ok`] and [`TryOnResult::failure`] to
/// keep that invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_on_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<FitRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TryOnResult {
    /// Successful result with a renderable image URL.
    pub fn ok(image_url: impl Into<String>, recommendations: Option<FitRecommendation>) -> Self {
        Self {
            success: true,
            try_on_image_url: Some(image_url.into()),
            recommendations,
            error: None,
        }
    }

    /// Failed result carrying a diagnostic message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            try_on_image_url: None,
            recommendations: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_camel_case() {
        let result = TryOnResult::ok(
            "https://cdn.example.com/tryon.jpg",
            Some(FitRecommendation {
                fit: Fit::Loose,
                confidence: 0.9,
                suggested_size: Some("L".to_string()),
                notes: "Runs large".to_string(),
            }),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["tryOnImageUrl"], "https://cdn.example.com/tryon.jpg");
        assert_eq!(json["recommendations"]["fit"], "loose");
        assert_eq!(json["recommendations"]["suggestedSize"], "L");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_omits_image_fields() {
        let result = TryOnResult::failure("boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
        assert!(json.get("tryOnImageUrl").is_none());
        assert!(json.get("recommendations").is_none());
    }

    #[test]
    fn test_request_deserializes_without_measurements() {
        let request: TryOnRequest = serde_json::from_str(
            r#"{"customerImage":"abc","garmentImage":"def","garmentType":"dress"}"#,
        )
        .unwrap();
        assert_eq!(request.garment_type, "dress");
        assert!(request.measurements.is_none());
    }
}
