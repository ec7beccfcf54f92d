use crate::{
    Config,
    model::{Coordinates, RawAirPollution, RawCitySearch, RawCurrentWeather, RawForecast},
    provider::openweather::OpenWeatherProvider,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::fmt::{self, Debug};

pub mod openweather;

/// Where to fetch weather for: a city name or a geolocated point.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn city(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Location query is empty. Enter a city name."));
        }
        Ok(Self::City(name.to_string()))
    }

    pub fn coordinates(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(anyhow!(
                "Invalid coordinates ({lat}, {lon}). Latitude must be within ±90 and longitude within ±180."
            ));
        }
        Ok(Self::Coordinates(Coordinates { lat, lon }))
    }

    /// Coordinates carried by the query itself, if any.
    pub fn as_coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::City(_) => None,
            Self::Coordinates(coords) => Some(*coords),
        }
    }

    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.clone())],
            Self::Coordinates(Coordinates { lat, lon }) => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates(Coordinates { lat, lon }) => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

/// Source of raw weather payloads. One plain request per call.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &LocationQuery) -> Result<RawCurrentWeather>;

    /// 5-day forecast at 3-hour resolution.
    async fn forecast(&self, query: &LocationQuery) -> Result<RawForecast>;

    async fn air_pollution(&self, coords: Coordinates) -> Result<RawAirPollution>;

    async fn search_cities(&self, query: &str) -> Result<RawCitySearch>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Box::new(provider))
}
