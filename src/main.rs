mod catalog;
mod gemini;
mod prompt;
mod routes;
mod selection;
mod services;
mod state;

use std::sync::Arc;

use crate::gemini::AdModel;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the model client (non-fatal: AI features disabled if config missing).
    let model: Option<Arc<dyn AdModel>> = match gemini::GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(
                image_model = client.image_model(),
                analysis_model = client.analysis_model(),
                "Gemini client initialized"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini client not configured, AI features disabled");
            None
        }
    };

    let state = state::AppState::new(model);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "adshot studio listening");
    axum::serve(listener, app).await.expect("server failed");
}
