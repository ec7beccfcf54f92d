//! Core library for the `weatherdash` dashboard.
//!
//! This crate defines:
//! - Provider payload models and the dashboard's normalized records
//! - Pure transforms (current conditions, daily forecast, hourly series, air quality)
//! - Threshold-based alert detection
//! - The OpenWeather provider and fetch orchestration
//! - Favorites on top of an injected key/value store
//! - Configuration & credentials handling
//!
//! It is used by `weatherdash-cli`, but can also be reused by other binaries or services.

pub mod alerts;
pub mod aqi;
pub mod config;
pub mod dashboard;
pub mod favorites;
pub mod icon;
pub mod model;
pub mod provider;
pub mod store;
pub mod transform;

pub use alerts::{Alert, AlertKind, Severity, detect_alerts};
pub use aqi::AqiLevel;
pub use config::Config;
pub use dashboard::{Dashboard, DashboardSnapshot, DashboardState};
pub use favorites::{Favorite, Favorites};
pub use model::{
    AirQuality, CitySuggestion, Coordinates, CurrentConditions, ForecastDay, HourlyPoint,
};
pub use provider::{LocationQuery, WeatherProvider, provider_from_config};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use transform::{
    transform_air_quality, transform_current_weather, transform_forecast, transform_hourly,
};
