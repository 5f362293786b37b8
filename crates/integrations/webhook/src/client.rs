use linkrelay_core::{
    JsonPayload, MultipartPayload, OutgoingPayload, RawRelayResponse, RelayError, RelayResult,
    classify,
};
use reqwest::Client;
use reqwest::multipart::Form;
use tracing::{debug, instrument, warn};

use crate::config::WebhookConfig;
use crate::error::WebhookError;
use crate::form::multipart_form;

/// Forwards submissions to the configured webhook endpoint.
///
/// Holds the injected [`WebhookConfig`] and a pooled `reqwest::Client`. Each
/// call to [`send`](Self::send) is one POST with no retry; the payload is
/// consumed so attachment buffers are released once the call completes.
#[derive(Debug, Clone)]
pub struct RelayClient {
    config: WebhookConfig,
    client: Client,
}

impl RelayClient {
    /// Create a relay client with an HTTP client built from the configured
    /// timeout and redirect policy.
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::default()
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| WebhookError::ClientBuild(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a relay client with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool.
    pub fn with_client(config: WebhookConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// The configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.config.url.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// POST the payload to the webhook and capture status and body text.
    ///
    /// Fails with [`WebhookError::NotConfigured`] before touching the network
    /// when no endpoint is set, and with [`WebhookError::Http`] when the call
    /// cannot complete. A body that cannot be read is reported as empty.
    pub async fn send(&self, payload: OutgoingPayload) -> Result<RawRelayResponse, WebhookError> {
        let url = self.endpoint().ok_or(WebhookError::NotConfigured)?;

        debug!(url = %url, encoding = payload.encoding(), "forwarding submission to webhook");

        let mut request = match payload {
            // reqwest sets the multipart content type and boundary itself.
            OutgoingPayload::Multipart(multipart) => {
                self.client.post(url).multipart(build_form(multipart))
            }
            OutgoingPayload::Json(json) => {
                let body = encode_json(&json)?;
                self.client
                    .post(url)
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body)
            }
        };

        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("webhook request timed out");
            } else {
                warn!(error = %e, "webhook request failed");
            }
            WebhookError::Http(e)
        })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();

        debug!(status, body_len = body_text.len(), "webhook responded");

        Ok(RawRelayResponse { status, body_text })
    }

    /// Run one relay attempt and classify the outcome.
    ///
    /// Never fails: configuration, transport and upstream failures all come
    /// back as a failed [`RelayResult`].
    #[instrument(skip(self, payload), fields(encoding = payload.encoding()))]
    pub async fn relay(&self, payload: OutgoingPayload) -> RelayResult {
        let outcome = self.send(payload).await.map_err(RelayError::from);
        let result = classify(outcome, |status| self.config.is_success_status(status));

        match &result {
            RelayResult::Success { status, .. } => debug!(status, "relay succeeded"),
            RelayResult::Failure { status, error, .. } => {
                warn!(status, error = %error, "relay failed");
            }
        }

        result
    }
}

fn encode_json(payload: &JsonPayload) -> Result<Vec<u8>, WebhookError> {
    serde_json::to_vec(payload).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
}

fn build_form(payload: MultipartPayload) -> Form {
    let (fields, files) = payload.into_parts();
    multipart_form(fields, files)
}
