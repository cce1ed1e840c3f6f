//! Generation flows — validation, prompt assembly, model call, outcome.
//!
//! DESIGN
//! ======
//! Both flows share the same shape: validate under the write lock and
//! snapshot the prompt + image payloads, release the lock for the model
//! call, then re-lock to store the outcome. Input and connectivity errors
//! are recorded on the session for the snapshot endpoint and returned to
//! the route layer. There is no retry logic: every retry is a fresh
//! user-initiated request.
//!
//! A failed generation keeps the previous result image; the stored error
//! hides it behind an overlay until the user retries.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::gemini::{AdModel, GenerateOutcome, ModelError, client};
use crate::prompt::{self, DesignKitInput};
use crate::state::AppState;

pub const NO_IMAGE_DESIGN_MESSAGE: &str =
    "The AI could not generate an image. Please try again with a different prompt or images.";
pub const NO_IMAGE_CREATIVE_MESSAGE: &str = "The AI could not edit the image. Try a different prompt.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "The AI failed to generate an image. This could be due to a safety policy violation or an internal error.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("AI features are not configured on this server.")]
    ModelNotConfigured,

    #[error("You are offline. Please check your internet connection.")]
    Offline,

    #[error("Please upload a product image first.")]
    MissingProductImage,

    #[error("Please upload a base image to edit.")]
    MissingBaseImage,

    #[error("Please enter a prompt to describe your edit.")]
    EmptyPrompt,

    #[error("A generation is already in progress for this session.")]
    Busy,

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Successful outcome of a generation request. `NoImage` is soft: the call
/// went through but the model produced no image part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    Image,
    NoImage { message: &'static str },
}

/// User-facing message for a model failure, carrying the provider's own
/// message when one can be extracted.
#[must_use]
pub fn failure_message(err: &ModelError) -> String {
    if let ModelError::ApiResponse { body, .. } = err {
        if let Some(detail) = client::provider_message(body) {
            return format!("The AI failed to generate an image: {detail}");
        }
    }
    GENERATION_FAILED_MESSAGE.to_string()
}

// =============================================================================
// DESIGN KIT
// =============================================================================

/// Run one Design Kit generation for the session.
///
/// # Errors
///
/// Returns a [`StudioError`] for missing inputs, offline sessions, an
/// in-flight generation, or a model failure. Input errors are also recorded
/// on the session for the snapshot endpoint.
pub async fn design_kit(
    state: &AppState,
    model: &Arc<dyn AdModel>,
    session_id: Uuid,
) -> Result<GenerateStatus, StudioError> {
    let (prompt_text, images) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(StudioError::SessionNotFound(session_id))?;

        if !session.online {
            session.design_error = Some(StudioError::Offline.to_string());
            return Err(StudioError::Offline);
        }
        let Some(product) = session.product_image.clone() else {
            session.design_error = Some(StudioError::MissingProductImage.to_string());
            return Err(StudioError::MissingProductImage);
        };
        if session.design_busy {
            return Err(StudioError::Busy);
        }

        session.design_busy = true;
        session.design_error = None;

        let input = DesignKitInput {
            selections: &session.selections,
            export: session.export,
            custom_prompt: &session.custom_prompt,
            has_reference_image: session.reference_image.is_some(),
            magic_composite: session.magic_composite,
        };
        let prompt_text = prompt::compose_design_kit(&input);

        let mut images = vec![product];
        if let Some(reference) = session.reference_image.clone() {
            images.push(reference);
        }
        (prompt_text, images)
    };

    info!(%session_id, prompt_len = prompt_text.len(), images = images.len(), "design kit: generating");
    let outcome = model.generate(&prompt_text, &images).await;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(StudioError::SessionNotFound(session_id))?;
    session.design_busy = false;

    match outcome {
        Ok(GenerateOutcome::Image(image)) => {
            info!(%session_id, mime = %image.mime_type, "design kit: image generated");
            session.generated_image = Some(image);
            session.design_error = None;
            Ok(GenerateStatus::Image)
        }
        Ok(GenerateOutcome::NoImage { text }) => {
            warn!(%session_id, model_text = text.as_deref().unwrap_or(""), "design kit: no image in response");
            session.design_error = Some(NO_IMAGE_DESIGN_MESSAGE.into());
            Ok(GenerateStatus::NoImage { message: NO_IMAGE_DESIGN_MESSAGE })
        }
        Err(e) => {
            warn!(%session_id, error = %e, "design kit: generation failed");
            session.design_error = Some(failure_message(&e));
            Err(StudioError::Model(e))
        }
    }
}

// =============================================================================
// CREATIVE STUDIO
// =============================================================================

/// Run one Creative Studio edit for the session.
///
/// # Errors
///
/// As [`design_kit`], plus [`StudioError::EmptyPrompt`] when the creative
/// instruction is blank.
pub async fn creative(
    state: &AppState,
    model: &Arc<dyn AdModel>,
    session_id: Uuid,
) -> Result<GenerateStatus, StudioError> {
    let (prompt_text, base) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(StudioError::SessionNotFound(session_id))?;

        if !session.online {
            session.creative_error = Some(StudioError::Offline.to_string());
            return Err(StudioError::Offline);
        }
        let Some(base) = session.base_image.clone() else {
            session.creative_error = Some(StudioError::MissingBaseImage.to_string());
            return Err(StudioError::MissingBaseImage);
        };
        if session.creative_prompt.trim().is_empty() {
            session.creative_error = Some(StudioError::EmptyPrompt.to_string());
            return Err(StudioError::EmptyPrompt);
        }
        if session.creative_busy {
            return Err(StudioError::Busy);
        }

        session.creative_busy = true;
        session.creative_error = None;
        (prompt::compose_creative(&session.creative_prompt), base)
    };

    info!(%session_id, prompt_len = prompt_text.len(), "creative studio: generating");
    let outcome = model.generate(&prompt_text, std::slice::from_ref(&base)).await;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or(StudioError::SessionNotFound(session_id))?;
    session.creative_busy = false;

    match outcome {
        Ok(GenerateOutcome::Image(image)) => {
            info!(%session_id, mime = %image.mime_type, "creative studio: image generated");
            session.creative_image = Some(image);
            session.creative_error = None;
            Ok(GenerateStatus::Image)
        }
        Ok(GenerateOutcome::NoImage { text }) => {
            warn!(%session_id, model_text = text.as_deref().unwrap_or(""), "creative studio: no image in response");
            session.creative_error = Some(NO_IMAGE_CREATIVE_MESSAGE.into());
            Ok(GenerateStatus::NoImage { message: NO_IMAGE_CREATIVE_MESSAGE })
        }
        Err(e) => {
            warn!(%session_id, error = %e, "creative studio: generation failed");
            session.creative_error = Some(failure_message(&e));
            Err(StudioError::Model(e))
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
