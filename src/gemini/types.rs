//! Model types — payloads, outcomes, errors, and the provider trait.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by model client operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the provider failed (timeout, DNS, connect).
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status. `body` holds the raw
    /// response; [`crate::gemini::client::provider_message`] extracts the
    /// user-facing message from it when one exists.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// An image in transfer-safe form: base64 bytes plus MIME type. Produced
/// once per upload or generation, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64-encoded raw bytes.
    pub data: String,
}

/// Outcome of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The first inline-image part of the response.
    Image(ImagePayload),
    /// The call succeeded but no part carried image data — a soft outcome,
    /// surfaced as "try a different prompt".
    NoImage {
        /// Any text the model returned instead.
        text: Option<String>,
    },
}

/// Per-category preset id suggestions from the composite analyzer. Missing
/// fields deserialize as empty, which the merge treats as "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionResult {
    pub camera: Vec<String>,
    pub lighting: Vec<String>,
    /// Always expected empty — mockups are not used with reference images.
    pub mockup: Vec<String>,
    pub manipulation: Vec<String>,
    pub retouch: Vec<String>,
    pub people_retouch: Vec<String>,
}

// =============================================================================
// MODEL TRAIT
// =============================================================================

/// Provider-neutral async trait for the generative model. Enables mocking
/// in tests and disables AI features cleanly when unconfigured.
#[async_trait::async_trait]
pub trait AdModel: Send + Sync {
    /// Send one generation request: the ordered image payloads followed by
    /// the prompt text.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] on transport failure, provider error status,
    /// or an unparseable response. An image-less success is *not* an error —
    /// it is [`GenerateOutcome::NoImage`].
    async fn generate(&self, prompt: &str, images: &[ImagePayload]) -> Result<GenerateOutcome, ModelError>;

    /// Analyze a product image against a style reference and suggest presets.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the call fails or the JSON cannot be
    /// parsed.
    async fn suggest(&self, product: &ImagePayload, reference: &ImagePayload)
    -> Result<SuggestionResult, ModelError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
