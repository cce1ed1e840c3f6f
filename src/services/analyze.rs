//! Composite suggestion analysis.
//!
//! DESIGN
//! ======
//! Runs automatically after any mutation that leaves a session with a
//! product image, a reference image, and magic composite enabled. Each
//! trigger bumps the session's analysis sequence; a completing analysis
//! merges its result only while its sequence is still current, so a
//! superseded response is dropped rather than overwriting newer state.
//! The in-flight HTTP call itself is never aborted.
//!
//! Merge rules: every non-empty category list in the result overwrites that
//! category's selection with the catalog presets matching the returned ids.
//! Unknown ids are silently filtered. Categories absent from the response
//! are left untouched, and the mockup list is ignored outright.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{self, Category, Preset};
use crate::gemini::SuggestionResult;
use crate::state::{AppState, Session};

pub const ANALYSIS_FAILED_MESSAGE: &str = "AI analysis failed. Please try again.";
pub const ANALYSIS_UNAVAILABLE_MESSAGE: &str = "AI analysis is unavailable: no model is configured.";

/// Run one analysis pass if the session qualifies. Never fails the caller:
/// analysis errors are recorded on the session, selections left untouched.
pub async fn maybe_analyze(state: &AppState, session_id: Uuid) {
    // Qualify and snapshot under the write lock; release before the call.
    let Some((seq, product, reference)) = begin_analysis(state, session_id).await else {
        return;
    };

    let Some(model) = state.model.clone() else {
        finish_with_error(state, session_id, seq, ANALYSIS_UNAVAILABLE_MESSAGE).await;
        return;
    };

    info!(%session_id, seq, "analysis: requesting composite suggestions");
    let result = model.suggest(&product, &reference).await;
    finish_analysis(state, session_id, seq, result).await;
}

/// Merge a completed analysis back into the session, unless a newer trigger
/// has superseded it.
async fn finish_analysis(
    state: &AppState,
    session_id: Uuid,
    seq: u64,
    result: Result<SuggestionResult, crate::gemini::ModelError>,
) {
    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        return;
    };
    if session.analysis_seq != seq {
        debug!(%session_id, seq, current = session.analysis_seq, "analysis: stale result dropped");
        return;
    }
    session.analyzing = false;

    match result {
        Ok(suggestions) => {
            merge_suggestions(session, &suggestions);
            info!(%session_id, seq, "analysis: suggestions merged");
        }
        Err(e) => {
            warn!(%session_id, seq, error = %e, "analysis: failed");
            session.analysis_error = Some(ANALYSIS_FAILED_MESSAGE.into());
        }
    }
}

/// Check the trigger condition and mark the session analyzing. Returns the
/// claimed sequence number plus image snapshots, or `None` when the session
/// does not qualify.
async fn begin_analysis(
    state: &AppState,
    session_id: Uuid,
) -> Option<(u64, crate::gemini::ImagePayload, crate::gemini::ImagePayload)> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&session_id)?;

    if !session.magic_composite {
        return None;
    }
    let product = session.product_image.clone()?;
    let reference = session.reference_image.clone()?;

    session.analysis_seq += 1;
    session.analyzing = true;
    session.analysis_error = None;
    session.suggested.clear();
    Some((session.analysis_seq, product, reference))
}

async fn finish_with_error(state: &AppState, session_id: Uuid, seq: u64, message: &str) {
    let mut sessions = state.sessions.write().await;
    if let Some(session) = sessions.get_mut(&session_id) {
        if session.analysis_seq == seq {
            session.analyzing = false;
            session.analysis_error = Some(message.into());
        }
    }
}

/// Apply a suggestion result to the session's selections and badge store.
fn merge_suggestions(session: &mut Session, suggestions: &SuggestionResult) {
    for category in Category::MULTI {
        let ids = suggested_ids(suggestions, category);
        if ids.is_empty() {
            // Absent or empty category: leave the current selection alone.
            continue;
        }

        let matched: Vec<&'static Preset> = ids.iter().filter_map(|id| catalog::find(category, id)).collect();
        if matched.len() < ids.len() {
            debug!(category = category.as_str(), dropped = ids.len() - matched.len(), "analysis: unknown preset ids filtered");
        }

        if let Some(set) = session.selections.set_mut(category) {
            set.replace(matched.iter().copied());
            session.suggested.insert(category.as_str(), matched.iter().map(|p| p.id).collect());
        }
    }
    // Mockups are never suggested alongside a reference image; ignore the
    // field even if the model populates it.
}

fn suggested_ids(suggestions: &SuggestionResult, category: Category) -> &[String] {
    match category {
        Category::Camera => &suggestions.camera,
        Category::Lighting => &suggestions.lighting,
        Category::Mockup => &suggestions.mockup,
        Category::Manipulation => &suggestions.manipulation,
        Category::Retouch => &suggestions.retouch,
        Category::PeopleRetouch => &suggestions.people_retouch,
    }
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
