use linkrelay_core::RelayError;
use thiserror::Error;

/// Errors specific to the relay client.
///
/// These are converted into [`RelayError`] at the pipeline boundary.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No webhook URL is configured.
    #[error("endpoint not set")]
    NotConfigured,

    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payload could not be serialized for the request body.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Transport errors drop the endpoint URL, which may carry a secret token.
impl From<WebhookError> for RelayError {
    fn from(err: WebhookError) -> Self {
        match err {
            WebhookError::NotConfigured => RelayError::NotConfigured,
            WebhookError::Http(e) => RelayError::Network(e.without_url().to_string()),
            WebhookError::InvalidPayload(msg) => RelayError::InvalidRequest(msg),
            WebhookError::ClientBuild(msg) => RelayError::Network(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_configured_maps_to_configuration_failure() {
        let err: RelayError = WebhookError::NotConfigured.into();
        assert!(matches!(err, RelayError::NotConfigured));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn invalid_payload_maps_to_invalid_request() {
        let err: RelayError = WebhookError::InvalidPayload("bad json".into()).into();
        assert!(matches!(err, RelayError::InvalidRequest(ref m) if m == "bad json"));
    }

    #[test]
    fn client_build_maps_to_network() {
        let err: RelayError = WebhookError::ClientBuild("tls".into()).into();
        assert!(matches!(err, RelayError::Network(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(WebhookError::NotConfigured.to_string(), "endpoint not set");
        assert_eq!(
            WebhookError::InvalidPayload("bad json".into()).to_string(),
            "invalid payload: bad json"
        );
    }
}
