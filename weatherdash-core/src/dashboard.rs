//! Fetch orchestration: one call turns a location query into everything the
//! dashboard shows.

use std::fmt::Display;

use anyhow::Result;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
    alerts::{Alert, detect_alerts},
    model::{AirQuality, CitySuggestion, CurrentConditions, ForecastDay, HourlyPoint},
    provider::{LocationQuery, WeatherProvider},
    transform,
};

/// Everything derived from one fetch. Replaced whole on the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub current: Option<CurrentConditions>,
    pub forecast: Vec<ForecastDay>,
    pub hourly: Vec<HourlyPoint>,
    pub alerts: Vec<Alert>,
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn load(&self, query: &LocationQuery) -> Result<DashboardSnapshot> {
        self.load_in(query, &Local).await
    }

    /// Current weather and forecast are fetched concurrently and both must
    /// succeed. Air quality is fetched afterwards; its failure only leaves
    /// `air_quality` empty.
    pub async fn load_in<Tz>(&self, query: &LocationQuery, tz: &Tz) -> Result<DashboardSnapshot>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        tracing::info!(%query, "loading dashboard");

        let (raw_current, raw_forecast) = tokio::try_join!(
            self.provider.current_weather(query),
            self.provider.forecast(query),
        )?;

        let current = transform::transform_current_weather(Some(&raw_current));
        let forecast = transform::transform_forecast_in(&raw_forecast, tz);
        let hourly = transform::transform_hourly_in(&raw_forecast, tz);
        let alerts = detect_alerts(current.as_ref(), &forecast);

        let air_quality = match query.as_coordinates().or(raw_current.coord) {
            Some(coords) => match self.provider.air_pollution(coords).await {
                Ok(raw) => transform::transform_air_quality(&raw),
                Err(e) => {
                    tracing::warn!("Failed to fetch AQI data: {e:#}");
                    None
                }
            },
            None => {
                tracing::debug!("no coordinates available, skipping air quality");
                None
            }
        };

        tracing::debug!(
            forecast_days = forecast.len(),
            alerts = alerts.len(),
            has_aqi = air_quality.is_some(),
            "dashboard loaded"
        );

        Ok(DashboardSnapshot {
            current,
            forecast,
            hourly,
            alerts,
            air_quality,
        })
    }

    /// Current conditions only.
    pub async fn current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<Option<CurrentConditions>> {
        let raw = self.provider.current_weather(query).await?;
        Ok(transform::transform_current_weather(Some(&raw)))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        let raw = self.provider.search_cities(query).await?;
        Ok(transform::transform_city_search(&raw))
    }
}

/// Caller-side holder for the latest snapshot.
///
/// Fetches are not cancelled; tagging each with the generation returned by
/// [`begin_request`](Self::begin_request) lets late responses from superseded
/// requests be dropped instead of overwriting newer data.
#[derive(Debug, Default)]
pub struct DashboardState {
    generation: u64,
    snapshot: Option<DashboardSnapshot>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Stores `snapshot` if `generation` is still the latest request.
    pub fn apply(&mut self, generation: u64, snapshot: DashboardSnapshot) -> bool {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                latest = self.generation,
                "discarding superseded dashboard response"
            );
            return false;
        }
        self.snapshot = Some(snapshot);
        true
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Drops held data; responses to requests issued before this are discarded.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.snapshot = None;
    }
}
