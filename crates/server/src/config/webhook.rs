use std::collections::HashMap;

use linkrelay_webhook::WebhookConfig;
use serde::Deserialize;

/// Outbound webhook configuration (config file representation).
///
/// The endpoint URL normally comes from the `N8N_WEBHOOK_URL` environment
/// variable; `url` is only used when that variable is unset or blank.
///
/// # Example
///
/// ```toml
/// [webhook]
/// url = "https://n8n.example.com/webhook/intake"
/// timeout_seconds = 15
/// success_status_codes = [200, 202]
///
/// [webhook.headers]
/// "X-Relay-Source" = "console"
/// ```
#[derive(Debug, Deserialize)]
pub struct WebhookServerConfig {
    /// Fallback endpoint URL.
    pub url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Statuses treated as success. Empty means any 2xx.
    #[serde(default)]
    pub success_status_codes: Vec<u16>,
    /// Whether to follow redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    /// Static headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for WebhookServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: default_timeout_seconds(),
            success_status_codes: Vec::new(),
            follow_redirects: default_follow_redirects(),
            headers: HashMap::new(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_follow_redirects() -> bool {
    true
}

impl WebhookServerConfig {
    /// Build the relay client configuration.
    ///
    /// `env_url` is the value of `N8N_WEBHOOK_URL`, if set; it wins over the
    /// file value unless blank.
    pub fn resolve(&self, env_url: Option<String>) -> WebhookConfig {
        let url = env_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.url.clone())
            .unwrap_or_default();

        let mut config = WebhookConfig::new(url)
            .with_timeout_secs(self.timeout_seconds)
            .with_success_status_codes(self.success_status_codes.clone());
        if !self.follow_redirects {
            config = config.with_no_redirects();
        }
        for (key, value) in &self.headers {
            config = config.with_header(key, value);
        }
        config
    }
}
