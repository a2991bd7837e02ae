use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use bigblue_mcp::{DEFAULT_BASE_URL, UpstreamConfig, create_server, serve_stdio};

#[derive(Parser)]
#[command(name = "bigblue-mcp")]
#[command(about = "MCP stdio server for the Bigblue product API")]
struct Cli {
    /// Bearer key for the Bigblue API
    #[arg(long, env = "BIGBLUE_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Base URL that operation names are appended to
    #[arg(long, env = "BIGBLUE_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Per-request timeout in seconds (defaults to no timeout)
    #[arg(long, env = "BIGBLUE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout carries the MCP session, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bigblue_mcp=info".parse()?)
                .add_directive("rmcp=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    run(cli)
        .await
        .inspect_err(|e| tracing::error!("Fatal error in main(): {:#}", e))
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = UpstreamConfig::new(cli.api_key, &cli.base_url)
        .context("Invalid upstream configuration")?;
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    info!(base_url = %config.base_url(), "Starting Bigblue MCP stdio server");

    let server = create_server(config)?;
    serve_stdio(server).await
}
