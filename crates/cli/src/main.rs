//! linkrelay CLI
//!
//! A command-line interface for submitting links and documents to a
//! linkrelay server.

mod commands;

use clap::{Parser, Subcommand};
use linkrelay_client::RelayServerClient;
use tracing_subscriber::{EnvFilter, fmt};

/// linkrelay CLI: submit links and documents to the relay server.
#[derive(Parser, Debug)]
#[command(name = "linkrelay", version, about)]
struct Cli {
    /// linkrelay server endpoint URL.
    #[arg(
        long,
        env = "LINKRELAY_ENDPOINT",
        default_value = "http://localhost:8080",
        global = true
    )]
    endpoint: String,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check server health.
    Health,
    /// Submit links and files for relaying.
    Submit(commands::submit::SubmitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = RelayServerClient::new(&cli.endpoint)?;

    match cli.command {
        Command::Health => commands::health::run(&client, &cli.format).await,
        Command::Submit(args) => commands::submit::run(&client, &args, &cli.format).await,
    }
}
