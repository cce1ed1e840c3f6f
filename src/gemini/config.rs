//! Gemini configuration parsed from environment variables.

use super::types::ModelError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeminiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub image_model: String,
    pub analysis_model: String,
    pub base_url: String,
    pub timeouts: GeminiTimeouts,
}

impl GeminiConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `GEMINI_IMAGE_MODEL`: default `gemini-2.5-flash-image`
    /// - `GEMINI_ANALYSIS_MODEL`: default `gemini-2.5-flash`
    /// - `GEMINI_BASE_URL`: default Google AI endpoint
    /// - `GEMINI_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GEMINI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingApiKey`] when `GEMINI_API_KEY` is absent.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| ModelError::MissingApiKey { var: "GEMINI_API_KEY".into() })?;

        Ok(Self::with_key(api_key)
            .image_model_opt(std::env::var("GEMINI_IMAGE_MODEL").ok())
            .analysis_model_opt(std::env::var("GEMINI_ANALYSIS_MODEL").ok())
            .base_url_opt(std::env::var("GEMINI_BASE_URL").ok())
            .timeouts(GeminiTimeouts {
                request_secs: env_parse_u64("GEMINI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("GEMINI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            }))
    }

    /// Config with defaults for everything but the key.
    #[must_use]
    pub fn with_key(api_key: String) -> Self {
        Self {
            api_key,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: GeminiTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        }
    }

    fn image_model_opt(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.image_model = model;
        }
        self
    }

    fn analysis_model_opt(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.analysis_model = model;
        }
        self
    }

    fn base_url_opt(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: GeminiTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
