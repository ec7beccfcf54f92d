use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weatherdash_core::{
    Config, Dashboard, Favorites, FileStore, LocationQuery, config::DEFAULT_BASE_URL,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and endpoint.
    Configure,

    /// Show current conditions, alerts, forecast and air quality.
    Show {
        /// City name, e.g. "Paris" or "Paris, FR".
        #[arg(required_unless_present = "lat", conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        /// Latitude, used with --lon instead of a city name.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude, used with --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the dashboard as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search cities by name.
    Search {
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Manage saved locations.
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List saved locations.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Fetch current conditions for a city and save it.
    Add { city: String },
    /// Remove a saved location by id.
    Remove { id: String },
    /// Remove all saved locations.
    Clear,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                city,
                lat,
                lon,
                json,
            } => {
                let query = match (city, lat, lon) {
                    (Some(city), _, _) => LocationQuery::city(&city)?,
                    (None, Some(lat), Some(lon)) => LocationQuery::coordinates(lat, lon)?,
                    _ => bail!("Provide a city name or both --lat and --lon."),
                };

                let snapshot = dashboard()?.load(&query).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                } else {
                    println!("{}", render::dashboard(&snapshot));
                }
                Ok(())
            }
            Command::Search { query, json } => {
                let cities = dashboard()?.search(&query).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&cities)?);
                } else {
                    println!("{}", render::cities(&cities));
                }
                Ok(())
            }
            Command::Favorites { action } => favorites(action).await,
        }
    }
}

fn dashboard() -> anyhow::Result<Dashboard> {
    let config = Config::load()?;
    Ok(Dashboard::new(provider_from_config(&config)?))
}

fn favorites_store() -> anyhow::Result<FileStore> {
    let dir = Config::data_dir()?;
    tracing::debug!(dir = %dir.display(), "using favorites store");
    Ok(FileStore::new(dir))
}

fn configure() -> anyhow::Result<()> {
    // Environment overrides must not end up in the saved file.
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty.");
    }
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url())
        .prompt()
        .context("Failed to read base URL")?;
    let base_url = base_url.trim().trim_end_matches('/');
    config.base_url = (base_url != DEFAULT_BASE_URL && !base_url.is_empty())
        .then(|| base_url.to_string());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn favorites(action: FavoritesCommand) -> anyhow::Result<()> {
    let mut favorites = Favorites::load(favorites_store()?);

    match action {
        FavoritesCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(favorites.list())?);
            } else {
                println!("{}", render::favorites(favorites.list()));
            }
        }
        FavoritesCommand::Add { city } => {
            let query = LocationQuery::city(&city)?;
            let Some(conditions) = dashboard()?.current_conditions(&query).await? else {
                bail!("No weather data returned for '{city}'.");
            };

            if favorites.add(&conditions)? {
                println!("Saved {} to favorites.", conditions.location);
            } else {
                println!("{} is already a favorite.", conditions.location);
            }
        }
        FavoritesCommand::Remove { id } => {
            if !favorites.remove(&id)? {
                bail!("No favorite with id '{id}'. Run `weatherdash favorites list` to see ids.");
            }
            println!("Removed {id}.");
        }
        FavoritesCommand::Clear => {
            favorites.clear()?;
            println!("Cleared favorites.");
        }
    }

    Ok(())
}
