use std::sync::Arc;

use super::*;
use crate::gemini::{AdModel, GenerateOutcome, ImagePayload, ModelError, SuggestionResult};
use crate::state::test_helpers;

// =========================================================================
// MockModel
// =========================================================================

struct MockModel {
    outcome: GenerateOutcome,
}

#[async_trait::async_trait]
impl AdModel for MockModel {
    async fn generate(&self, _prompt: &str, _images: &[ImagePayload]) -> Result<GenerateOutcome, ModelError> {
        Ok(self.outcome.clone())
    }

    async fn suggest(
        &self,
        _product: &ImagePayload,
        _reference: &ImagePayload,
    ) -> Result<SuggestionResult, ModelError> {
        Ok(SuggestionResult::default())
    }
}

fn image_model() -> Arc<dyn AdModel> {
    Arc::new(MockModel {
        outcome: GenerateOutcome::Image(ImagePayload { mime_type: "image/png".into(), data: "aW1n".into() }),
    })
}

// =========================================================================
// generation handlers
// =========================================================================

#[tokio::test]
async fn generate_without_a_configured_model_is_unavailable() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;

    let err = design_kit(State(state.clone()), Path(id)).await.unwrap_err();
    assert_eq!(err, StatusCode::SERVICE_UNAVAILABLE);
    let err = creative(State(state), Path(id)).await.unwrap_err();
    assert_eq!(err, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn design_kit_end_to_end_returns_image_status() {
    let state = test_helpers::test_app_state_with_model(image_model());
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.product_image = Some(test_helpers::png_payload());
    })
    .await;

    let Json(response) = design_kit(State(state.clone()), Path(id)).await.unwrap();
    assert!(matches!(response, GenerateResponse::Image));

    test_helpers::with_session(&state, id, |s| {
        assert!(s.generated_image.is_some());
    })
    .await;
}

#[tokio::test]
async fn design_kit_without_product_image_is_unprocessable() {
    let state = test_helpers::test_app_state_with_model(image_model());
    let id = test_helpers::seed_session(&state).await;

    let err = design_kit(State(state), Path(id)).await.unwrap_err();
    assert_eq!(err, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn offline_generation_is_unavailable_end_to_end() {
    let state = test_helpers::test_app_state_with_model(image_model());
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.product_image = Some(test_helpers::png_payload());
        s.online = false;
    })
    .await;

    let err = design_kit(State(state), Path(id)).await.unwrap_err();
    assert_eq!(err, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn no_image_status_serializes_with_its_message() {
    let state = test_helpers::test_app_state_with_model(Arc::new(MockModel {
        outcome: GenerateOutcome::NoImage { text: None },
    }));
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.base_image = Some(test_helpers::png_payload());
        s.creative_prompt = "edit".into();
    })
    .await;

    let Json(response) = creative(State(state), Path(id)).await.unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["status"], "noImage");
    assert!(value["message"].as_str().unwrap().contains("Try a different prompt"));
}

// =========================================================================
// download
// =========================================================================

#[tokio::test]
async fn download_serves_the_result_as_an_attachment() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        // "iVBORw0KGgo=" decodes to the PNG magic prefix.
        s.generated_image = Some(test_helpers::png_payload());
    })
    .await;

    let response = download(State(state), Path((id, "design-kit".into()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        response.headers().get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"ai-product-shot.png\""
    );
}

#[tokio::test]
async fn creative_download_uses_its_own_filename() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;
    test_helpers::with_session(&state, id, |s| {
        s.creative_image = Some(test_helpers::png_payload());
    })
    .await;

    let response = download(State(state), Path((id, "creative".into()))).await.unwrap();
    assert_eq!(
        response.headers().get(CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"creative-studio-edit.png\""
    );
}

#[tokio::test]
async fn download_missing_result_or_unknown_mode_is_not_found() {
    let state = test_helpers::test_app_state();
    let id = test_helpers::seed_session(&state).await;

    let err = download(State(state.clone()), Path((id, "design-kit".into()))).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
    let err = download(State(state), Path((id, "thumbnail".into()))).await.unwrap_err();
    assert_eq!(err, StatusCode::NOT_FOUND);
}

// =========================================================================
// error mapping
// =========================================================================

#[test]
fn studio_errors_map_to_stable_status_codes() {
    use uuid::Uuid;
    assert_eq!(studio_error_to_status(&StudioError::SessionNotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(studio_error_to_status(&StudioError::Offline), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(studio_error_to_status(&StudioError::ModelNotConfigured), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(studio_error_to_status(&StudioError::MissingProductImage), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(studio_error_to_status(&StudioError::MissingBaseImage), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(studio_error_to_status(&StudioError::EmptyPrompt), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(studio_error_to_status(&StudioError::Busy), StatusCode::CONFLICT);
    assert_eq!(
        studio_error_to_status(&StudioError::Model(ModelError::ApiParse("x".into()))),
        StatusCode::BAD_GATEWAY
    );
}
