mod server;
mod telemetry;
mod webhook;


pub use server::*;
pub use telemetry::*;
pub use webhook::*;

use serde::Deserialize;

/// Top-level configuration for the relay server, loaded from a TOML file.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct RelayServerConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound webhook configuration.
    #[serde(default)]
    pub webhook: WebhookServerConfig,
    /// Inbound request limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Log output configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
