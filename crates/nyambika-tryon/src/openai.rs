//! OpenAI provider adapter.
//!
//! Two-stage pipeline: a gpt-4o multimodal completion analyzes the customer
//! photo against the garment and returns structured fit JSON, then dall-e-3
//! renders a try-on visual from the analysis description.
//!
//! Also hosts the other gpt-4o-backed operations: fashion image analysis
//! and size recommendation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use nyambika_models::{
    FashionAnalysis, Fit, FitRecommendation, Measurements, SizeRecommendation, TryOnResult,
};

use crate::config::OpenAiConfig;
use crate::error::{ProviderResult, TryOnError};
use crate::image;

const CHAT_MODEL: &str = "gpt-4o";
const IMAGE_MODEL: &str = "dall-e-3";

const TRYON_SYSTEM_PROMPT: &str = r#"You are an AI fashion expert specializing in virtual try-on technology and size recommendations.
Analyze the customer photo and clothing item to provide accurate fit recommendations.
Consider body proportions, clothing type, and measurements if provided.
Respond with JSON in this format:
{
  "bodyAnalysis": {
    "bodyType": "string",
    "shoulderWidth": "narrow|medium|broad",
    "height": "short|medium|tall",
    "build": "slim|medium|athletic|plus"
  },
  "fitRecommendation": {
    "fit": "perfect|loose|tight",
    "confidence": number,
    "suggestedSize": "XS|S|M|L|XL|XXL",
    "notes": "detailed explanation"
  },
  "virtualTryOnDescription": "detailed description of how the clothing would look on this person"
}"#;

const FASHION_SYSTEM_PROMPT: &str = r#"You are a fashion AI expert. Analyze clothing images and provide detailed categorization.
Respond with JSON in this format:
{
  "category": "shirts|dresses|pants|shoes|accessories|etc",
  "colors": ["color1", "color2"],
  "style": "casual|formal|business|athletic|trendy|etc",
  "description": "detailed description",
  "tags": ["tag1", "tag2", "tag3"]
}"#;

const SIZING_SYSTEM_PROMPT: &str = r#"You are a professional fashion sizing expert. Based on customer measurements and product type,
recommend the best size from available options. Consider international sizing standards.
Respond with JSON in this format:
{
  "recommendedSize": "size",
  "confidence": number,
  "alternatives": ["size1", "size2"],
  "notes": "explanation of recommendation"
}"#;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: &'static str,
    prompt: String,
    n: u32,
    size: &'static str,
    quality: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    url: Option<String>,
}

/// Structured analysis from stage (a). Every field is optional: a sparse or
/// empty model reply parses to defaults rather than erroring.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TryOnAnalysis {
    fit_recommendation: AnalysisFit,
    virtual_try_on_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AnalysisFit {
    fit: Option<Fit>,
    confidence: Option<f64>,
    suggested_size: Option<String>,
    notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the OpenAI chat-completions and image-generation APIs.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: OpenAiConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    /// Create a client sharing an existing HTTP client.
    pub fn with_http(http: Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }

    /// Generate a try-on image with fit recommendations.
    ///
    /// With `DEMO_TRYON_FALLBACK` set or no API key configured, returns a
    /// mocked success echoing the customer photo. Quota-style failures also
    /// degrade to the demo result instead of erroring.
    pub async fn generate_try_on(
        &self,
        customer_image: &str,
        garment_image: &str,
        garment_type: &str,
        measurements: Option<&Measurements>,
    ) -> ProviderResult<TryOnResult> {
        let customer = image::to_raw_base64(&self.http, customer_image).await?;
        let garment = image::to_raw_base64(&self.http, garment_image).await?;

        let api_key = match (self.config.demo_fallback, &self.config.api_key) {
            (false, Some(key)) => key.clone(),
            _ => {
                debug!("Serving demo try-on result (no OpenAI key or demo mode)");
                return Ok(demo_result(&customer, garment_type));
            }
        };

        match self
            .run_try_on_pipeline(&api_key, &customer, &garment, garment_type, measurements)
            .await
        {
            Ok(result) => Ok(result),
            Err(e) if looks_like_quota_error(&e.to_string()) => {
                warn!("OpenAI quota failure ({}), serving demo fallback", e);
                Ok(demo_result(&customer, garment_type))
            }
            Err(e) => Err(e),
        }
    }

    async fn run_try_on_pipeline(
        &self,
        api_key: &str,
        customer_base64: &str,
        garment_base64: &str,
        garment_type: &str,
        measurements: Option<&Measurements>,
    ) -> ProviderResult<TryOnResult> {
        // Stage (a): multimodal fit analysis.
        let mut user_text = format!(
            "Please analyze this customer photo and clothing item for virtual try-on.\nProduct type: {}\n",
            garment_type
        );
        if let Some(m) = measurements {
            user_text.push_str(&format!("Customer measurements: {}\n", serde_json::to_string(m)?));
        }
        user_text.push_str("Provide fit analysis and size recommendations.");

        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(TRYON_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text { text: user_text },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image::as_jpeg_data_url(customer_base64),
                            },
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image::as_jpeg_data_url(garment_base64),
                            },
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat { format_type: "json_object" },
            max_tokens: Some(1000),
        };

        let content = self.chat_completion(api_key, &request).await?;
        // Empty or malformed analysis yields defaults downstream, never an error.
        let analysis: TryOnAnalysis =
            serde_json::from_str(extract_json(&content)).unwrap_or_default();

        // Stage (b): render the try-on visual.
        let description = analysis
            .virtual_try_on_description
            .unwrap_or_else(|| "Show the clothing fitted appropriately on the person.".to_string());
        let prompt = format!(
            "Create a realistic virtual try-on image showing a person wearing {}. {} \
             Style: Professional fashion photography, clean background, focus on fit and appearance. \
             Make it look natural and realistic.",
            garment_type, description
        );

        let image_url = self.generate_image(api_key, prompt).await?;

        let fit = analysis.fit_recommendation;
        Ok(TryOnResult::ok(
            image_url,
            Some(FitRecommendation {
                fit: fit.fit.unwrap_or(Fit::Perfect),
                confidence: fit.confidence.unwrap_or(0.8),
                suggested_size: Some(fit.suggested_size.unwrap_or_else(|| "M".to_string())),
                notes: fit
                    .notes
                    .unwrap_or_else(|| "AI-generated size recommendation".to_string()),
            }),
        ))
    }

    /// Categorize a garment photo.
    pub async fn analyze_fashion_image(&self, image_input: &str) -> ProviderResult<FashionAnalysis> {
        let garment = image::to_raw_base64(&self.http, image_input).await?;
        let api_key = self.require_key()?;

        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(FASHION_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: "Analyze this fashion item and provide categorization details."
                                .to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image::as_jpeg_data_url(&garment),
                            },
                        },
                    ]),
                },
            ],
            response_format: ResponseFormat { format_type: "json_object" },
            max_tokens: None,
        };

        let content = self.chat_completion(&api_key, &request).await?;
        serde_json::from_str(extract_json(&content))
            .map_err(|e| TryOnError::invalid_response(format!("Failed to parse fashion analysis: {}", e)))
    }

    /// Recommend a size from measurements against the product's size chart.
    pub async fn recommend_size(
        &self,
        measurements: &Measurements,
        product_type: &str,
        product_sizes: &[String],
    ) -> ProviderResult<SizeRecommendation> {
        let api_key = self.require_key()?;

        let user_text = format!(
            "Customer measurements: {}\nProduct type: {}\nAvailable sizes: {}\nRecommend the best size and provide alternatives.",
            serde_json::to_string(measurements)?,
            product_type,
            product_sizes.join(", ")
        );

        let request = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SIZING_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(user_text),
                },
            ],
            response_format: ResponseFormat { format_type: "json_object" },
            max_tokens: None,
        };

        let content = self.chat_completion(&api_key, &request).await?;
        serde_json::from_str(extract_json(&content))
            .map_err(|e| TryOnError::invalid_response(format!("Failed to parse size recommendation: {}", e)))
    }

    fn require_key(&self) -> ProviderResult<String> {
        self.config
            .api_key
            .clone()
            .ok_or_else(|| TryOnError::config("OPENAI_API_KEY is not set"))
    }

    /// Run a chat completion and return the assistant message content
    /// (empty string when the model returned none).
    async fn chat_completion(&self, api_key: &str, request: &ChatRequest) -> ProviderResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.api_base.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TryOnError::provider(format!("OpenAI API returned {}: {}", status, body)));
        }

        let chat: ChatResponse = response.json().await?;
        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn generate_image(&self, api_key: &str, prompt: String) -> ProviderResult<String> {
        let url = format!("{}/v1/images/generations", self.config.api_base.trim_end_matches('/'));

        let request = ImageGenerationRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: "1024x1024",
            quality: "standard",
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TryOnError::provider(format!("OpenAI API returned {}: {}", status, body)));
        }

        let generated: ImageGenerationResponse = response.json().await?;
        Ok(generated
            .data
            .into_iter()
            .next()
            .and_then(|i| i.url)
            .unwrap_or_default())
    }
}

/// Mocked result for demo mode: echo the customer photo so the storefront
/// has something to render.
fn demo_result(customer_base64: &str, garment_type: &str) -> TryOnResult {
    TryOnResult::ok(
        image::as_jpeg_data_url(customer_base64),
        Some(FitRecommendation {
            fit: Fit::Perfect,
            confidence: 0.75,
            suggested_size: Some("M".to_string()),
            notes: format!("Demo mode: estimated fit for {}.", garment_type),
        }),
    )
}

fn looks_like_quota_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("429") || lower.contains("quota") || lower.contains("insufficient")
}

/// Strip markdown code fences some models wrap around JSON replies.
fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_strips_fences() {
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_sparse_analysis_parses_to_defaults() {
        let analysis: TryOnAnalysis = serde_json::from_str("{}").unwrap();
        assert!(analysis.fit_recommendation.fit.is_none());
        assert!(analysis.virtual_try_on_description.is_none());
    }

    #[test]
    fn test_quota_error_detection() {
        assert!(looks_like_quota_error("OpenAI API returned 429: slow down"));
        assert!(looks_like_quota_error("insufficient_quota"));
        assert!(!looks_like_quota_error("connection refused"));
    }
}
