//! Gemini HTTP transport.
//!
//! Thin wrapper over `models/{model}:generateContent`. Request bodies are
//! built and responses parsed by pure functions for testability; only
//! `generate_content` touches the network.

use std::time::Duration;

use serde_json::{Value, json};

use super::config::GeminiConfig;
use super::types::{AdModel, GenerateOutcome, ImagePayload, ModelError, SuggestionResult};

/// Fixed instruction sent with every composite-suggestion analysis call.
const ANALYSIS_PROMPT: &str = "You are a professional art director. Analyze the provided product \
image (first) and the reference/style image (second).\n\n\
Your goal is to suggest the best technical and creative presets to create a high-end \
advertisement by placing the product into a NEW scene that is HEAVILY INSPIRED by the reference \
image's style, mood, and lighting. Do NOT suggest simply putting the product into the reference \
image.\n\n\
Your response MUST be in JSON format. Provide suggestions for the following categories by \
returning the preset 'id's.\n\
- \"camera\": Suggest 1-2 camera presets that would best frame the product in a scene like the reference.\n\
- \"lighting\": Suggest 1-2 lighting presets that mimic the reference image's mood.\n\
- \"manipulation\": Suggest 2-3 manipulation/FX presets to seamlessly blend the product and achieve the desired style (e.g., atmospheric effects, reflections).\n\
- \"retouch\": Suggest 1-2 essential product retouching presets.\n\
- \"peopleRetouch\": If the product is for people (e.g., makeup) or the reference has people, suggest 1 preset. Otherwise, return an empty array.\n\
- \"mockup\": Return an empty array. Mockups are not used with reference images.\n\n\
Example response:\n\
{\n\
  \"camera\": [\"hero-45\"],\n\
  \"lighting\": [\"day-02\"],\n\
  \"mockup\": [],\n\
  \"manipulation\": [\"shadow-synthesis\", \"atmospheric-fx\", \"ibl-match\"],\n\
  \"retouch\": [\"cleanup\", \"specular-control\"],\n\
  \"peopleRetouch\": []\n\
}";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build the client from [`GeminiConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::HttpClientBuild`] if the HTTP client fails.
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ModelError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn image_model(&self) -> &str {
        &self.config.image_model
    }

    #[must_use]
    pub fn analysis_model(&self) -> &str {
        &self.config.analysis_model
    }

    /// One `generateContent` POST. Returns the raw response body on 200.
    async fn generate_content(&self, model: &str, body: &Value) -> Result<String, ModelError> {
        let url = format!("{}/models/{model}:generateContent", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ModelError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(ModelError::ApiResponse { status, body: text });
        }

        Ok(text)
    }
}

#[async_trait::async_trait]
impl AdModel for GeminiClient {
    async fn generate(&self, prompt: &str, images: &[ImagePayload]) -> Result<GenerateOutcome, ModelError> {
        let body = build_generate_body(prompt, images);
        let text = self.generate_content(&self.config.image_model, &body).await?;
        parse_generate_response(&text)
    }

    async fn suggest(
        &self,
        product: &ImagePayload,
        reference: &ImagePayload,
    ) -> Result<SuggestionResult, ModelError> {
        let body = build_suggest_body(product, reference);
        let text = self.generate_content(&self.config.analysis_model, &body).await?;
        parse_suggestion_response(&text)
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

fn inline_part(image: &ImagePayload) -> Value {
    json!({ "inlineData": { "mimeType": image.mime_type, "data": image.data } })
}

/// Generation request: ordered image parts, then the prompt text, asking for
/// both image and text response modalities.
pub(crate) fn build_generate_body(prompt: &str, images: &[ImagePayload]) -> Value {
    let mut parts: Vec<Value> = images.iter().map(inline_part).collect();
    parts.push(json!({ "text": prompt }));

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] },
    })
}

/// Analysis request: product part, reference part, fixed instruction, with
/// the response constrained to the six-array JSON schema.
pub(crate) fn build_suggest_body(product: &ImagePayload, reference: &ImagePayload) -> Value {
    let string_array = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

    json!({
        "contents": [{
            "role": "user",
            "parts": [inline_part(product), inline_part(reference), { "text": ANALYSIS_PROMPT }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "camera": string_array.clone(),
                    "lighting": string_array.clone(),
                    "mockup": string_array.clone(),
                    "manipulation": string_array.clone(),
                    "retouch": string_array.clone(),
                    "peopleRetouch": string_array,
                },
                "required": ["camera", "lighting", "mockup", "manipulation", "retouch", "peopleRetouch"],
            },
        },
    })
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Deserialize)]
struct ApiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(serde::Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Unrecognized part shapes (thought signatures etc.) — skipped.
    Other(serde_json::Value),
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

// =============================================================================
// PARSING
// =============================================================================

/// Scan response parts in order and return the first inline-image part.
/// A response with no image part is the soft [`GenerateOutcome::NoImage`].
pub(crate) fn parse_generate_response(body: &str) -> Result<GenerateOutcome, ModelError> {
    let api: ApiResponse = serde_json::from_str(body).map_err(|e| ModelError::ApiParse(e.to_string()))?;

    let mut text_parts: Vec<String> = Vec::new();
    for part in response_parts(api) {
        match part {
            Part::InlineData { inline_data } => {
                return Ok(GenerateOutcome::Image(ImagePayload {
                    mime_type: inline_data.mime_type,
                    data: inline_data.data,
                }));
            }
            Part::Text { text } => {
                if !text.trim().is_empty() {
                    text_parts.push(text);
                }
            }
            Part::Other(_) => {}
        }
    }

    let text = if text_parts.is_empty() { None } else { Some(text_parts.join("\n")) };
    Ok(GenerateOutcome::NoImage { text })
}

/// Extract the analyzer's JSON object from the first text part.
pub(crate) fn parse_suggestion_response(body: &str) -> Result<SuggestionResult, ModelError> {
    let api: ApiResponse = serde_json::from_str(body).map_err(|e| ModelError::ApiParse(e.to_string()))?;

    let text = response_parts(api)
        .into_iter()
        .find_map(|part| match part {
            Part::Text { text } => Some(text),
            _ => None,
        })
        .ok_or_else(|| ModelError::ApiParse("analysis response contained no text part".into()))?;

    serde_json::from_str(strip_code_fence(&text)).map_err(|e| ModelError::ApiParse(e.to_string()))
}

/// Flatten candidates into one ordered part list.
fn response_parts(api: ApiResponse) -> Vec<Part> {
    api.candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| c.content)
        .filter_map(|c| c.parts)
        .flatten()
        .collect()
}

/// Models occasionally wrap JSON in a markdown fence despite the schema.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

/// Pull the provider's human-readable message out of an error body, for
/// surfacing alongside generation failures.
#[must_use]
pub fn provider_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| value.get("message").and_then(Value::as_str))
        .map(ToString::to_string)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
