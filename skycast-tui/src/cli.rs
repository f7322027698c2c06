use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, provider};

use crate::app;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// City shown when the dashboard starts. Defaults to the configured one.
    #[arg(short, long)]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => dashboard(self.city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Configuration aborted")?;
    config.api_key = Some(api_key);

    let default_city = inquire::Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Configuration aborted")?;
    config.default_city = default_city;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}

async fn dashboard(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider::provider_from_config(&config)?;
    let city = city.unwrap_or(config.default_city);

    app::run(provider, city).await
}
