//! Session lifecycle and mutation routes.
//!
//! DESIGN
//! ======
//! Every mutation is a small lock-scoped state change returning `{ok:true}`.
//! The snapshot endpoint is the single read surface: it reports selection
//! ids (with the `"none"` sentinel rendered), AI-pick badges, flags and
//! error messages, plus presence booleans for the stored images. Image
//! bytes travel only through the upload bodies and the download routes.
//!
//! Uploading a product or reference image, and re-enabling magic composite,
//! kick off suggestion analysis in a background task so the mutation
//! response never waits on the model.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Category;
use crate::gemini::ImagePayload;
use crate::selection::{self, ExportSettings};
use crate::services::analyze;
use crate::state::{AppState, Session};

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionsSnapshot {
    pub camera: Vec<&'static str>,
    pub lighting: Vec<&'static str>,
    pub mockup: &'static str,
    pub manipulation: Vec<&'static str>,
    pub retouch: Vec<&'static str>,
    pub people_retouch: Vec<&'static str>,
}

/// Full session read model. Image presence is reported as booleans; the
/// bytes are fetched through the download routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub has_product_image: bool,
    pub has_reference_image: bool,
    pub selections: SelectionsSnapshot,
    /// AI-pick badge ids keyed by category wire name.
    pub suggested: HashMap<&'static str, Vec<&'static str>>,
    pub export_settings: ExportSettings,
    pub custom_prompt: String,
    pub magic_composite: bool,
    pub analyzing: bool,
    pub analysis_error: Option<String>,
    pub has_generated_image: bool,
    pub design_error: Option<String>,
    pub design_busy: bool,
    pub has_base_image: bool,
    pub creative_prompt: String,
    pub has_creative_image: bool,
    pub creative_error: Option<String>,
    pub creative_busy: bool,
    pub online: bool,
}

fn snapshot_of(id: Uuid, session: &Session) -> SessionSnapshot {
    SessionSnapshot {
        id,
        has_product_image: session.product_image.is_some(),
        has_reference_image: session.reference_image.is_some(),
        selections: SelectionsSnapshot {
            camera: session.selections.camera.ids(),
            lighting: session.selections.lighting.ids(),
            mockup: session.selections.mockup.id(),
            manipulation: session.selections.manipulation.ids(),
            retouch: session.selections.retouch.ids(),
            people_retouch: session.selections.people_retouch.ids(),
        },
        suggested: session.suggested.clone(),
        export_settings: session.export,
        custom_prompt: session.custom_prompt.clone(),
        magic_composite: session.magic_composite,
        analyzing: session.analyzing,
        analysis_error: session.analysis_error.clone(),
        has_generated_image: session.generated_image.is_some(),
        design_error: session.design_error.clone(),
        design_busy: session.design_busy,
        has_base_image: session.base_image.is_some(),
        creative_prompt: session.creative_prompt.clone(),
        has_creative_image: session.creative_image.is_some(),
        creative_error: session.creative_error.clone(),
        creative_busy: session.creative_busy,
        online: session.online,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePresetBody {
    pub category: Category,
    pub preset_id: String,
}

#[derive(Deserialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Deserialize)]
pub struct EnabledBody {
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct OnlineBody {
    pub online: bool,
}

// =============================================================================
// HELPERS
// =============================================================================

/// Mutate one session under the write lock; 404 for unknown ids.
async fn with_session<F, T>(state: &AppState, id: Uuid, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&mut Session) -> T,
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(f(session))
}

fn spawn_analysis(state: &AppState, id: Uuid) {
    let state = state.clone();
    tokio::spawn(async move { analyze::maybe_analyze(&state, id).await });
}

fn ok() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// `POST /api/session` — create a fresh session.
pub async fn create(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let id = state.create_session().await;
    Json(CreateSessionResponse { id })
}

/// `GET /api/session/:id` — full session snapshot.
pub async fn snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(snapshot_of(id, session)))
}

// =============================================================================
// IMAGES
// =============================================================================

/// `PUT /api/session/:id/product-image` — store the product image.
pub async fn put_product_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ImagePayload>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.product_image = Some(body)).await?;
    spawn_analysis(&state, id);
    Ok(ok())
}

/// `DELETE /api/session/:id/product-image`
pub async fn delete_product_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.product_image = None).await?;
    Ok(ok())
}

/// `PUT /api/session/:id/reference-image` — store the style reference.
pub async fn put_reference_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ImagePayload>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.reference_image = Some(body)).await?;
    spawn_analysis(&state, id);
    Ok(ok())
}

/// `DELETE /api/session/:id/reference-image` — also drops the AI-pick badges,
/// which only make sense against a reference.
pub async fn delete_reference_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| {
        s.reference_image = None;
        s.suggested.clear();
        s.analysis_error = None;
    })
    .await?;
    Ok(ok())
}

/// `PUT /api/session/:id/base-image` — Creative Studio source image.
pub async fn put_base_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ImagePayload>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.base_image = Some(body)).await?;
    Ok(ok())
}

/// `DELETE /api/session/:id/base-image`
pub async fn delete_base_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.base_image = None).await?;
    Ok(ok())
}

// =============================================================================
// SELECTIONS & SETTINGS
// =============================================================================

/// `POST /api/session/:id/toggle` — apply one preset click. Unknown preset
/// ids are rejected without touching state.
pub async fn toggle_preset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TogglePresetBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let applied =
        with_session(&state, id, |s| selection::apply_by_id(&mut s.selections, body.category, &body.preset_id))
            .await?;
    if applied { Ok(ok()) } else { Err(StatusCode::NOT_FOUND) }
}

/// `PUT /api/session/:id/export-settings`
pub async fn put_export_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ExportSettings>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.export = body).await?;
    Ok(ok())
}

/// `PUT /api/session/:id/custom-prompt`
pub async fn put_custom_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TextBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.custom_prompt = body.text).await?;
    Ok(ok())
}

/// `PUT /api/session/:id/creative-prompt`
pub async fn put_creative_prompt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TextBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.creative_prompt = body.text).await?;
    Ok(ok())
}

/// `PUT /api/session/:id/magic-composite` — flip the AI-composite mode.
/// Disabling resets all selections and clears the AI-pick badges; enabling
/// re-triggers analysis when both images are present.
pub async fn put_magic_composite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<EnabledBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| {
        s.magic_composite = body.enabled;
        if !body.enabled {
            s.selections.reset();
            s.suggested.clear();
            s.analysis_error = None;
            s.analyzing = false;
        }
    })
    .await?;
    if body.enabled {
        spawn_analysis(&state, id);
    }
    Ok(ok())
}

/// `PUT /api/session/:id/online` — client-reported connectivity.
pub async fn put_online(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<OnlineBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    with_session(&state, id, |s| s.online = body.online).await?;
    Ok(ok())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
