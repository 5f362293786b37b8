use linkrelay_client::RelayServerClient;

use crate::OutputFormat;

pub async fn run(client: &RelayServerClient, format: &OutputFormat) -> anyhow::Result<()> {
    match client.health().await {
        Ok(health) if health.is_ok() => {
            match format {
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "status": health.status,
                        "webhook_configured": health.webhook_configured,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Text => {
                    println!("linkrelay server is healthy.");
                    if !health.webhook_configured {
                        println!("Warning: webhook endpoint is not configured.");
                    }
                }
            }
            Ok(())
        }
        Ok(health) => {
            eprintln!("linkrelay server returned status {:?}.", health.status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to reach server: {e}");
            std::process::exit(1);
        }
    }
}
