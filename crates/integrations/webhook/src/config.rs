use std::collections::HashMap;
use std::time::Duration;

use linkrelay_core::is_2xx;

/// Environment variable holding the webhook endpoint URL.
pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";

/// Configuration for the relay client.
///
/// Built once at startup and injected into
/// [`RelayClient`](crate::RelayClient); the client never reads the process
/// environment itself.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Target URL for the webhook. `None` means not configured.
    pub url: Option<String>,

    /// Static headers to include in every request.
    pub headers: HashMap<String, String>,

    /// Request timeout.
    pub timeout: Duration,

    /// HTTP status codes considered successful. If empty, any 2xx is
    /// accepted.
    pub success_status_codes: Vec<u16>,

    /// Whether to follow redirects.
    pub follow_redirects: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
            success_status_codes: Vec::new(),
            follow_redirects: true,
        }
    }
}

impl WebhookConfig {
    /// Create a new configuration targeting the given URL.
    ///
    /// Defaults to a 30-second timeout, following redirects, and accepting
    /// any 2xx status.
    pub fn new(url: impl Into<String>) -> Self {
        Self::default().with_url(url)
    }

    /// A configuration without an endpoint. Every send fails with a
    /// configuration error.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Set the target URL. A blank URL leaves the endpoint unconfigured.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
        self
    }

    /// Add a static header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set specific HTTP status codes to consider successful.
    ///
    /// When empty (the default), any 2xx status code is accepted.
    #[must_use]
    pub fn with_success_status_codes(mut self, codes: Vec<u16>) -> Self {
        self.success_status_codes = codes;
        self
    }

    /// Disable following HTTP redirects.
    #[must_use]
    pub fn with_no_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Check whether the status code indicates success based on configuration.
    pub fn is_success_status(&self, status: u16) -> bool {
        if self.success_status_codes.is_empty() {
            is_2xx(status)
        } else {
            self.success_status_codes.contains(&status)
        }
    }
}
