use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linkrelay_core::{RelayError, RelayResult};
use linkrelay_webhook::WebhookError;
use thiserror::Error;

/// Errors that can occur when running the relay server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The relay client could not be set up.
    #[error("webhook error: {0}")]
    Webhook(#[from] WebhookError),

    /// A relay attempt failed before or during forwarding.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let result = match self {
            Self::Relay(err) => RelayResult::from(err),
            other => RelayResult::Failure {
                status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                error: other.to_string(),
                detail: None,
            },
        };
        relay_response(&result)
    }
}

/// Render a [`RelayResult`] as the response envelope with its HTTP status.
pub fn relay_response(result: &RelayResult) -> Response {
    let status =
        StatusCode::from_u16(result.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}
