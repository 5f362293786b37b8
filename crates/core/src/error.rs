use thiserror::Error;

use crate::response::ResponseBody;

/// HTTP status used for local failures (configuration, transport, request).
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// HTTP status used when the webhook answered with a non-success status.
pub const UPSTREAM_FAILURE_STATUS: u16 = 502;

/// Failures of a single relay attempt.
///
/// Unparsable response bodies are not an error: they surface as
/// [`ResponseBody::Raw`].
#[derive(Debug, Error)]
pub enum RelayError {
    /// No webhook endpoint is configured.
    #[error("endpoint not set")]
    NotConfigured,

    /// The outbound call did not complete (DNS, refused connection, timeout).
    #[error("{0}")]
    Network(String),

    /// The webhook answered with a status outside the success range.
    #[error("upstream error: {status}")]
    Upstream { status: u16, detail: ResponseBody },

    /// The inbound submission could not be read.
    #[error("{0}")]
    InvalidRequest(String),
}

impl RelayError {
    /// HTTP status reported to the caller: 500 for local failures, 502 for
    /// upstream ones.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Upstream { .. } => UPSTREAM_FAILURE_STATUS,
            Self::NotConfigured | Self::Network(_) | Self::InvalidRequest(_) => {
                LOCAL_FAILURE_STATUS
            }
        }
    }

    /// Returns `true` if the failure originated at the webhook rather than
    /// locally.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
