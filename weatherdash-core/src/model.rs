//! Provider payloads (`Raw*`) and the dashboard's normalized records.
//!
//! Raw shapes mirror the OpenWeather 2.5 JSON closely and tolerate sparse
//! responses: anything the provider may omit is an `Option` or defaulted.
//! Normalized shapes are what the dashboard renders; they serialize with
//! camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw provider shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCurrentWeather {
    pub name: Option<String>,
    pub main: Option<RawMain>,
    pub wind: Option<RawWind>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    pub sys: Option<RawSys>,
    /// Shift from UTC in seconds.
    pub timezone: Option<i64>,
    /// Meters.
    pub visibility: Option<f64>,
    pub uvi: Option<f64>,
    pub coord: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMain {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub pressure: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawWind {
    /// Meters per second.
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCondition {
    pub main: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSys {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub list: Vec<RawForecastEntry>,
    pub city: Option<RawCity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    pub main: RawForecastMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCity {
    pub name: Option<String>,
    pub country: Option<String>,
    pub coord: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAirPollution {
    #[serde(default)]
    pub list: Vec<RawPollutionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPollutionSnapshot {
    pub dt: Option<i64>,
    pub main: RawAqi,
    #[serde(default)]
    pub components: Pollutants,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawAqi {
    pub aqi: u8,
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: Option<f64>,
    pub no: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub nh3: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCitySearch {
    #[serde(default)]
    pub list: Vec<RawCityMatch>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCityMatch {
    pub name: String,
    pub sys: Option<RawSys>,
    pub coord: Option<Coordinates>,
    pub main: Option<RawForecastMain>,
}

// ---------------------------------------------------------------------------
// Normalized dashboard records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub location: String,
    /// °C
    pub temperature: i64,
    /// °C
    pub feels_like: i64,
    /// Percent.
    pub humidity: u8,
    /// km/h
    pub wind_speed: i64,
    /// hPa
    pub pressure: u32,
    /// km
    pub visibility: i64,
    pub uv_index: f64,
    pub description: String,
    pub weather_icon: String,
    /// Location-local "HH:MM".
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// "Tomorrow" or a weekday name.
    pub day: String,
    pub high: i64,
    pub low: i64,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    /// Viewer-local "HH".
    pub time_label: String,
    pub temp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQuality {
    /// Provider category, 1 (good) to 5.
    pub aqi: u8,
    pub components: Pollutants,
    pub measured_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitySuggestion {
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub temperature: Option<i64>,
}

impl CitySuggestion {
    /// "City, CC" form accepted by the city query endpoints.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(cc) if !cc.is_empty() => format!("{}, {}", self.name, cc),
            _ => self.name.clone(),
        }
    }
}
