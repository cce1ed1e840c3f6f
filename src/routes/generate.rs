//! Generation and download routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use base64::Engine as _;
use serde::Serialize;
use uuid::Uuid;

use crate::services::generate::{self, GenerateStatus, StudioError};
use crate::state::AppState;

/// Response for a generation request that reached the model. Failures are
/// status codes; their messages land on the session snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum GenerateResponse {
    Image,
    NoImage { message: &'static str },
}

impl From<GenerateStatus> for GenerateResponse {
    fn from(status: GenerateStatus) -> Self {
        match status {
            GenerateStatus::Image => GenerateResponse::Image,
            GenerateStatus::NoImage { message } => GenerateResponse::NoImage { message },
        }
    }
}

/// `POST /api/session/:id/generate` — run one Design Kit generation.
pub async fn design_kit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    let Some(model) = state.model.clone() else {
        return Err(studio_error_to_status(&StudioError::ModelNotConfigured));
    };
    let status = generate::design_kit(&state, &model, id)
        .await
        .map_err(|e| studio_error_to_status(&e))?;
    Ok(Json(status.into()))
}

/// `POST /api/session/:id/creative/generate` — run one Creative Studio edit.
pub async fn creative(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    let Some(model) = state.model.clone() else {
        return Err(studio_error_to_status(&StudioError::ModelNotConfigured));
    };
    let status = generate::creative(&state, &model, id)
        .await
        .map_err(|e| studio_error_to_status(&e))?;
    Ok(Json(status.into()))
}

/// `GET /api/session/:id/download/:mode` — result image as an attachment.
/// `mode` is `design-kit` or `creative`; each mode has a fixed filename.
pub async fn download(
    State(state): State<AppState>,
    Path((id, mode)): Path<(Uuid, String)>,
) -> Result<Response, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let (image, filename) = match mode.as_str() {
        "design-kit" => (session.generated_image.as_ref(), "ai-product-shot.png"),
        "creative" => (session.creative_image.as_ref(), "creative-studio-edit.png"),
        _ => return Err(StatusCode::NOT_FOUND),
    };
    let image = image.ok_or(StatusCode::NOT_FOUND)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&image.data)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let headers = [
        (CONTENT_TYPE, image.mime_type.clone()),
        (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ];
    Ok((headers, bytes).into_response())
}

pub(crate) fn studio_error_to_status(err: &StudioError) -> StatusCode {
    match err {
        StudioError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        StudioError::ModelNotConfigured | StudioError::Offline => StatusCode::SERVICE_UNAVAILABLE,
        StudioError::MissingProductImage | StudioError::MissingBaseImage | StudioError::EmptyPrompt => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        StudioError::Busy => StatusCode::CONFLICT,
        StudioError::Model(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
