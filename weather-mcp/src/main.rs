//! Binary crate for the `weather-mcp` server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup (stderr; stdout carries the protocol)
//! - Exposing the `getWeather` tool over MCP stdio

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
