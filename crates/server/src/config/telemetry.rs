use serde::Deserialize;

/// Log output configuration.
///
/// `RUST_LOG` takes precedence over `filter` when set.
///
/// # Example
///
/// ```toml
/// [telemetry]
/// filter = "linkrelay_webhook=debug,info"
/// ansi = false
/// ```
#[derive(Debug, Deserialize)]
pub struct TelemetryConfig {
    /// Default `EnvFilter` directives.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Whether to emit ANSI colors.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ansi: default_ansi(),
        }
    }
}

fn default_filter() -> String {
    "info".to_owned()
}

fn default_ansi() -> bool {
    true
}
