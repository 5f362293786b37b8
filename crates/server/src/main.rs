use std::path::Path;

use clap::Parser;
use tracing::{info, warn};

use linkrelay_server::api::{AppState, router};
use linkrelay_server::config::RelayServerConfig;
use linkrelay_server::error::ServerError;
use linkrelay_webhook::{RelayClient, WEBHOOK_URL_ENV};

/// linkrelay HTTP server.
#[derive(Parser, Debug)]
#[command(
    name = "linkrelay-server",
    about = "Relays link and document submissions to a webhook"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "linkrelay.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_exists = Path::new(&cli.config).exists();
    let config: RelayServerConfig = if config_exists {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)
            .map_err(|e| ServerError::Config(format!("{}: {e}", cli.config)))?
    } else {
        toml::from_str("")?
    };

    linkrelay_server::telemetry::init(&config.telemetry);

    if !config_exists {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let webhook = config.webhook.resolve(std::env::var(WEBHOOK_URL_ENV).ok());
    if webhook.is_configured() {
        info!(timeout = ?webhook.timeout, "webhook endpoint configured");
    } else {
        warn!(
            env = WEBHOOK_URL_ENV,
            "webhook endpoint not set, submissions will be rejected"
        );
    }

    let relay = RelayClient::new(webhook)?;
    let state = AppState::new(relay, config.limits.max_body_bytes);
    let app = router(state);

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "linkrelay server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
