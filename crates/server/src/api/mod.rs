pub mod health;
pub mod schemas;
pub mod submit;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use linkrelay_webhook::RelayClient;

/// Shared application state passed to all handlers.
///
/// Holds only immutable data; every submission builds and owns its own
/// payload.
#[derive(Clone)]
pub struct AppState {
    /// Outbound relay client with the injected webhook configuration.
    pub relay: Arc<RelayClient>,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(relay: RelayClient, max_body_bytes: usize) -> Self {
        Self {
            relay: Arc::new(relay),
            max_body_bytes,
        }
    }
}

/// Build the Axum router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route("/health", get(health::health))
        .route("/api/submit", post(submit::submit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
