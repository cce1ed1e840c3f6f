//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the in-memory session map and an optional model client. Sessions
//! are owned entirely by this process — nothing persists across restarts.
//! Handlers never hold the session lock across a model call: they snapshot
//! inputs, release, await, then re-lock to merge.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gemini::{AdModel, ImagePayload};
use crate::selection::{DesignSelections, ExportSettings};

// =============================================================================
// SESSION
// =============================================================================

/// Per-session state for both studio modes. Mirrors what the browser holds:
/// uploaded images, design-kit selections, results and error flags.
#[derive(Default)]
pub struct Session {
    // Design Kit
    pub product_image: Option<ImagePayload>,
    pub reference_image: Option<ImagePayload>,
    pub selections: DesignSelections,
    pub export: ExportSettings,
    pub custom_prompt: String,
    pub magic_composite: bool,
    pub generated_image: Option<ImagePayload>,
    pub design_error: Option<String>,
    pub design_busy: bool,

    // Composite suggestion analysis
    /// Filtered suggestion ids per category wire name, kept for "AI pick"
    /// badges until the next analysis or reset.
    pub suggested: HashMap<&'static str, Vec<&'static str>>,
    /// Bumped on every analysis trigger; a completing analysis merges only
    /// if its sequence is still current, so stale responses are dropped.
    pub analysis_seq: u64,
    pub analyzing: bool,
    pub analysis_error: Option<String>,

    // Creative Studio
    pub base_image: Option<ImagePayload>,
    pub creative_prompt: String,
    pub creative_image: Option<ImagePayload>,
    pub creative_error: Option<String>,
    pub creative_busy: bool,

    /// Client-reported browser connectivity. Generation refuses to call the
    /// model while offline.
    pub online: bool,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self { magic_composite: true, online: true, ..Self::default() }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; all inner fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    /// Optional model client. `None` if `GEMINI_API_KEY` is not configured.
    pub model: Option<Arc<dyn AdModel>>,
}

impl AppState {
    #[must_use]
    pub fn new(model: Option<Arc<dyn AdModel>>) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), model }
    }

    /// Create a fresh session and return its id.
    pub async fn create_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, Session::new());
        id
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(None)
    }

    #[must_use]
    pub fn test_app_state_with_model(model: Arc<dyn AdModel>) -> AppState {
        AppState::new(Some(model))
    }

    /// Seed a default session and return its id.
    pub async fn seed_session(state: &AppState) -> Uuid {
        state.create_session().await
    }

    /// A tiny valid-looking PNG payload for tests.
    #[must_use]
    pub fn png_payload() -> ImagePayload {
        ImagePayload { mime_type: "image/png".into(), data: "iVBORw0KGgo=".into() }
    }

    /// Run a closure against one session under the write lock.
    pub async fn with_session<F>(state: &AppState, id: Uuid, f: F)
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = state.sessions.write().await;
        f(sessions.get_mut(&id).expect("session should exist"));
    }
}
