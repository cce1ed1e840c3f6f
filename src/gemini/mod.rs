//! Gemini — client for the generative image and analysis models.
//!
//! DESIGN
//! ======
//! One HTTP client wraps two `generateContent` uses: image generation
//! (IMAGE+TEXT response modalities, first inline-image part wins) and
//! composite-suggestion analysis (JSON response constrained by a schema).
//! Orchestration code depends on the [`AdModel`] trait, not the concrete
//! client, so tests can script model behavior.

pub mod client;
pub mod config;
pub mod types;

pub use client::GeminiClient;
pub use config::GeminiConfig;
pub use types::{AdModel, GenerateOutcome, ImagePayload, ModelError, SuggestionResult};
