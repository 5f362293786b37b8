//! Tracing subscriber initialization.
//!
//! Installs a [`tracing_subscriber`] registry with an `fmt` layer and an
//! `EnvFilter`. `RUST_LOG` wins over the configured default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::TelemetryConfig;

/// Initialize the global tracing subscriber.
///
/// An invalid configured filter falls back to `info` rather than aborting
/// startup.
pub fn init(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_ansi(config.ansi);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
