//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under `/api` and serves the studio's
//! static frontend as the fallback. All handlers take [`AppState`] via the
//! `State` extractor; error messages meant for the user are recorded on the
//! session and surfaced through the snapshot endpoint, so handlers map
//! failures to bare status codes.

pub mod catalog;
pub mod generate;
pub mod session;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the directory holding the built frontend.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR").map_or_else(|_| PathBuf::from("./static"), PathBuf::from)
}

/// Full application router: API routes, health check, static frontend.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/presets", get(catalog::list_presets))
        .route("/api/session", post(session::create))
        .route("/api/session/{id}", get(session::snapshot))
        .route(
            "/api/session/{id}/product-image",
            put(session::put_product_image).delete(session::delete_product_image),
        )
        .route(
            "/api/session/{id}/reference-image",
            put(session::put_reference_image).delete(session::delete_reference_image),
        )
        .route(
            "/api/session/{id}/base-image",
            put(session::put_base_image).delete(session::delete_base_image),
        )
        .route("/api/session/{id}/toggle", post(session::toggle_preset))
        .route("/api/session/{id}/export-settings", put(session::put_export_settings))
        .route("/api/session/{id}/custom-prompt", put(session::put_custom_prompt))
        .route("/api/session/{id}/creative-prompt", put(session::put_creative_prompt))
        .route("/api/session/{id}/magic-composite", put(session::put_magic_composite))
        .route("/api/session/{id}/online", put(session::put_online))
        .route("/api/session/{id}/generate", post(generate::design_kit))
        .route("/api/session/{id}/creative/generate", post(generate::creative))
        .route("/api/session/{id}/download/{mode}", get(generate::download))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir()).append_index_html_on_directories(true))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
