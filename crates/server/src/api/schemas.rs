use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status indicator.
    pub status: String,
    /// Whether a webhook endpoint is configured.
    pub webhook_configured: bool,
}
