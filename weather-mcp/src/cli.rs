use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use tracing::info;
use weather_core::{Config, WeatherLookup, WeatherQuery};

use crate::server::WeatherServer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp", version, about = "Weather MCP server")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the getWeather tool over stdin/stdout.
    Serve,

    /// Run one lookup and print what the tool would return.
    Show {
        /// Location name, e.g. "Lahore".
        location: String,

        /// Optional YYYY-MM-DD date; if absent, means current conditions.
        #[arg(long)]
        date: Option<String>,
    },

    /// Update and persist the configuration file.
    Configure {
        /// Geocoding search endpoint.
        #[arg(long)]
        geocoding_url: Option<String>,

        /// Forecast endpoint.
        #[arg(long)]
        weather_url: Option<String>,

        /// Timeout for each upstream request, in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = self.config_path()?;

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => {
                let config = Config::load_from(&config_path)?;
                serve(&config).await?;
            }
            Command::Show { location, date } => {
                let config = Config::load_from(&config_path)?;
                let query = WeatherQuery { location, date };
                query.validate()?;

                let lookup = WeatherLookup::from_config(&config)?;
                println!("{}", lookup.respond(&query).await);
            }
            Command::Configure { geocoding_url, weather_url, timeout_secs } => {
                if geocoding_url.is_none() && weather_url.is_none() && timeout_secs.is_none() {
                    bail!(
                        "Nothing to configure.\n\
                         Hint: pass --geocoding-url, --weather-url or --timeout-secs."
                    );
                }

                let mut config = Config::load_from(&config_path)?;
                if let Some(url) = geocoding_url {
                    config.geocoding_url = url;
                }
                if let Some(url) = weather_url {
                    config.weather_url = url;
                }
                if let Some(secs) = timeout_secs {
                    config.timeout_secs = secs;
                }

                config.validate()?;
                config.save_to(&config_path)?;
                println!("Saved configuration to {}", config_path.display());
            }
        }

        Ok(())
    }

    /// `--config` if given, the platform config file otherwise.
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let lookup = WeatherLookup::from_config(config)?;

    info!(
        geocoding_url = %config.geocoding_url,
        weather_url = %config.weather_url,
        timeout_secs = config.timeout_secs,
        "starting weather MCP server on stdio"
    );

    let service = WeatherServer::new(lookup)
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to establish stdio transport")?;

    let reason = service.waiting().await?;
    info!(?reason, "weather MCP server stopped");

    Ok(())
}
