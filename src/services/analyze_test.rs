use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::gemini::{AdModel, GenerateOutcome, ImagePayload, ModelError};
use crate::state::test_helpers;

// =========================================================================
// MockModel
// =========================================================================

struct MockModel {
    suggestions: Mutex<Vec<Result<SuggestionResult, ModelError>>>,
    suggest_calls: AtomicUsize,
}

impl MockModel {
    fn new(suggestions: Vec<Result<SuggestionResult, ModelError>>) -> Self {
        Self { suggestions: Mutex::new(suggestions), suggest_calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.suggest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AdModel for MockModel {
    async fn generate(&self, _prompt: &str, _images: &[ImagePayload]) -> Result<GenerateOutcome, ModelError> {
        Ok(GenerateOutcome::NoImage { text: None })
    }

    async fn suggest(
        &self,
        _product: &ImagePayload,
        _reference: &ImagePayload,
    ) -> Result<SuggestionResult, ModelError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        let mut suggestions = self.suggestions.lock().unwrap();
        if suggestions.is_empty() {
            Ok(SuggestionResult::default())
        } else {
            suggestions.remove(0)
        }
    }
}

fn suggestion(camera: &[&str], lighting: &[&str], manipulation: &[&str]) -> SuggestionResult {
    SuggestionResult {
        camera: camera.iter().map(ToString::to_string).collect(),
        lighting: lighting.iter().map(ToString::to_string).collect(),
        manipulation: manipulation.iter().map(ToString::to_string).collect(),
        ..SuggestionResult::default()
    }
}

/// Session seeded with both images so analysis qualifies.
async fn ready_state(model: Arc<MockModel>) -> (AppState, Uuid) {
    let state = test_helpers::test_app_state_with_model(model);
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.product_image = Some(test_helpers::png_payload());
        s.reference_image = Some(test_helpers::png_payload());
    })
    .await;
    (state, id)
}

// =========================================================================
// trigger conditions
// =========================================================================

#[tokio::test]
async fn analysis_skipped_without_both_images() {
    let model = Arc::new(MockModel::new(vec![]));
    let state = test_helpers::test_app_state_with_model(model.clone());
    let id = test_helpers::seed_session(&state).await;

    // Product only.
    test_helpers::with_session(&state, id, |s| {
        s.product_image = Some(test_helpers::png_payload());
    })
    .await;
    maybe_analyze(&state, id).await;
    assert_eq!(model.calls(), 0);

    // Reference only.
    test_helpers::with_session(&state, id, |s| {
        s.product_image = None;
        s.reference_image = Some(test_helpers::png_payload());
    })
    .await;
    maybe_analyze(&state, id).await;
    assert_eq!(model.calls(), 0);

    test_helpers::with_session(&state, id, |s| {
        assert!(!s.analyzing);
        assert!(s.analysis_error.is_none());
    })
    .await;
}

#[tokio::test]
async fn analysis_skipped_when_magic_composite_is_off() {
    let model = Arc::new(MockModel::new(vec![]));
    let (state, id) = ready_state(model.clone()).await;
    test_helpers::with_session(&state, id, |s| s.magic_composite = false).await;

    maybe_analyze(&state, id).await;
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn analysis_without_a_model_records_unavailable() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.product_image = Some(test_helpers::png_payload());
        s.reference_image = Some(test_helpers::png_payload());
    })
    .await;

    maybe_analyze(&state, id).await;

    test_helpers::with_session(&state, id, |s| {
        assert!(!s.analyzing);
        assert_eq!(s.analysis_error.as_deref(), Some(ANALYSIS_UNAVAILABLE_MESSAGE));
    })
    .await;
}

#[tokio::test]
async fn analysis_on_unknown_session_is_a_no_op() {
    let model = Arc::new(MockModel::new(vec![]));
    let state = test_helpers::test_app_state_with_model(model.clone());
    maybe_analyze(&state, Uuid::new_v4()).await;
    assert_eq!(model.calls(), 0);
}

// =========================================================================
// merge semantics
// =========================================================================

#[tokio::test]
async fn known_suggestions_overwrite_their_categories() {
    let model =
        Arc::new(MockModel::new(vec![Ok(suggestion(&["hero-45"], &["day-02"], &["ibl-match", "shadow-synthesis"]))]));
    let (state, id) = ready_state(model.clone()).await;

    // A prior manual pick should be overwritten wholesale.
    test_helpers::with_session(&state, id, |s| {
        assert!(crate::selection::apply_by_id(&mut s.selections, Category::Camera, "top-down"));
    })
    .await;

    maybe_analyze(&state, id).await;
    assert_eq!(model.calls(), 1);

    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.camera.ids(), vec!["hero-45"]);
        assert_eq!(s.selections.lighting.ids(), vec!["day-02"]);
        assert_eq!(s.selections.manipulation.ids(), vec!["ibl-match", "shadow-synthesis"]);
        assert_eq!(s.suggested.get("camera"), Some(&vec!["hero-45"]));
        assert_eq!(s.suggested.get("manipulation"), Some(&vec!["ibl-match", "shadow-synthesis"]));
        assert!(!s.analyzing);
        assert!(s.analysis_error.is_none());
    })
    .await;
}

#[tokio::test]
async fn absent_categories_keep_their_current_selection() {
    let model = Arc::new(MockModel::new(vec![Ok(suggestion(&["hero-45"], &[], &[]))]));
    let (state, id) = ready_state(model).await;

    test_helpers::with_session(&state, id, |s| {
        assert!(crate::selection::apply_by_id(&mut s.selections, Category::Retouch, "cleanup"));
    })
    .await;

    maybe_analyze(&state, id).await;

    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.camera.ids(), vec!["hero-45"]);
        assert_eq!(s.selections.retouch.ids(), vec!["cleanup"]);
        assert!(!s.suggested.contains_key("retouch"));
    })
    .await;
}

#[tokio::test]
async fn unknown_ids_are_silently_filtered() {
    let model = Arc::new(MockModel::new(vec![Ok(suggestion(&["hero-45", "not-a-preset"], &[], &[]))]));
    let (state, id) = ready_state(model).await;

    maybe_analyze(&state, id).await;

    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.camera.ids(), vec!["hero-45"]);
        assert_eq!(s.suggested.get("camera"), Some(&vec!["hero-45"]));
        assert!(s.analysis_error.is_none());
    })
    .await;
}

#[tokio::test]
async fn mockup_suggestions_are_ignored() {
    let mut result = suggestion(&[], &[], &[]);
    result.mockup = vec!["marble-counter".into()];
    let model = Arc::new(MockModel::new(vec![Ok(result)]));
    let (state, id) = ready_state(model).await;

    maybe_analyze(&state, id).await;

    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.mockup.id(), crate::catalog::NONE_ID);
        assert!(!s.suggested.contains_key("mockup"));
    })
    .await;
}

// =========================================================================
// failure and superseding
// =========================================================================

#[tokio::test]
async fn failed_analysis_records_error_and_leaves_selections() {
    let model = Arc::new(MockModel::new(vec![Err(ModelError::ApiParse("bad json".into()))]));
    let (state, id) = ready_state(model).await;

    test_helpers::with_session(&state, id, |s| {
        assert!(crate::selection::apply_by_id(&mut s.selections, Category::Camera, "macro-detail"));
    })
    .await;

    maybe_analyze(&state, id).await;

    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.camera.ids(), vec!["macro-detail"]);
        assert_eq!(s.analysis_error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(!s.analyzing);
    })
    .await;
}

#[tokio::test]
async fn stale_analysis_result_is_dropped() {
    let model = Arc::new(MockModel::new(vec![]));
    let (state, id) = ready_state(model).await;

    // Two triggers in flight: the first claim is superseded by the second.
    let first = begin_analysis(&state, id).await.map(|(seq, _, _)| seq);
    assert_eq!(first, Some(1));
    let second = begin_analysis(&state, id).await.map(|(seq, _, _)| seq);
    assert_eq!(second, Some(2));

    // The stale completion is dropped wholesale.
    finish_analysis(&state, id, 1, Ok(suggestion(&["hero-45"], &[], &[]))).await;
    test_helpers::with_session(&state, id, |s| {
        assert!(s.selections.camera.is_none());
        assert!(s.suggested.is_empty());
        assert!(s.analyzing, "the newer analysis is still in flight");
    })
    .await;

    // The current one merges normally.
    finish_analysis(&state, id, 2, Ok(suggestion(&["eye-level"], &[], &[]))).await;
    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.selections.camera.ids(), vec!["eye-level"]);
        assert!(!s.analyzing);
    })
    .await;
}

#[tokio::test]
async fn each_trigger_bumps_the_sequence_and_clears_badges() {
    let model = Arc::new(MockModel::new(vec![
        Ok(suggestion(&["hero-45"], &[], &[])),
        Ok(suggestion(&["eye-level"], &[], &[])),
    ]));
    let (state, id) = ready_state(model.clone()).await;

    maybe_analyze(&state, id).await;
    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.analysis_seq, 1);
        assert_eq!(s.suggested.get("camera"), Some(&vec!["hero-45"]));
    })
    .await;

    maybe_analyze(&state, id).await;
    test_helpers::with_session(&state, id, |s| {
        assert_eq!(s.analysis_seq, 2);
        assert_eq!(s.suggested.get("camera"), Some(&vec!["eye-level"]));
        assert_eq!(s.selections.camera.ids(), vec!["eye-level"]);
    })
    .await;
    assert_eq!(model.calls(), 2);
}
