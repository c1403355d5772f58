use std::io;

use anyhow::Context;
use clap::{Parser, Subcommand};
use travel_core::{Config, Providers, ServiceId};

use crate::{
    prompt::{self, InquirePrompter},
    session::{Session, Settings},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travel", version, about = "Weather and sights around any place")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search locations interactively (the default).
    Explore {
        /// Language for place names and descriptions, e.g. "en".
        #[arg(long)]
        lang: Option<String>,

        /// Default search radius in meters.
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Store the API key of a service.
    Configure {
        /// Service short name: "graphhopper", "openweather" or "opentripmap".
        service: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Explore { lang: None, radius: None }) {
            Command::Explore { lang, radius } => explore(lang, radius).await,
            Command::Configure { service } => configure(&service),
        }
    }
}

async fn explore(lang: Option<String>, radius: Option<u32>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let providers = Providers::from_config(&config)?;

    let settings = Settings {
        language: lang.unwrap_or(config.language),
        default_radius: radius.unwrap_or(config.default_radius),
    };

    let mut session = Session::new(
        &providers.locations,
        &providers.weather,
        &providers.places,
        InquirePrompter,
        io::stdout(),
        settings,
    );
    session.run().await?;

    Ok(())
}

fn configure(service: &str) -> anyhow::Result<()> {
    let service = ServiceId::try_from(service)?;
    let mut config = Config::load_stored()?;

    let key = prompt::api_key(service)?;
    config.upsert_api_key(service, key);
    config.save().context("Failed to store API key")?;

    println!("Saved {service} key to {}", Config::config_file_path()?.display());
    Ok(())
}
