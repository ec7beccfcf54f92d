//! Threshold advisories derived from normalized conditions and forecast days.

use serde::{Deserialize, Serialize};

use crate::model::{CurrentConditions, ForecastDay};

/// Forecast days (from the first) that are scanned for alerts.
pub const FORECAST_WINDOW: usize = 3;

const CURRENT_HEAT_C: i64 = 35;
const CURRENT_FREEZE_C: i64 = 0;
const HIGH_WIND_KMH: i64 = 50;
const FORECAST_HEAT_C: i64 = 38;
const FORECAST_FREEZE_C: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    ExtremeHeat,
    Freezing,
    Thunderstorm,
    HeavyRain,
    HighWind,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtremeHeat => "extreme_heat",
            Self::Freezing => "freezing",
            Self::Thunderstorm => "thunderstorm",
            Self::HeavyRain => "heavy_rain",
            Self::HighWind => "high_wind",
        }
    }

    /// Prefix of the alert id.
    fn id_prefix(&self) -> &'static str {
        match self {
            Self::ExtremeHeat => "heat",
            Self::Freezing => "freeze",
            Self::Thunderstorm => "thunder",
            Self::HeavyRain => "rain",
            Self::HighWind => "wind",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique within one detection pass.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    fn current(kind: AlertKind, severity: Severity, message: String) -> Self {
        Self {
            id: format!("{}-current", kind.id_prefix()),
            kind,
            message,
            severity,
        }
    }

    fn forecast(kind: AlertKind, index: usize, severity: Severity, message: String) -> Self {
        Self {
            id: format!("{}-forecast-{index}", kind.id_prefix()),
            kind,
            message,
            severity,
        }
    }
}

/// Scans current conditions and the first [`FORECAST_WINDOW`] forecast days.
///
/// Current-condition alerts come first, followed by forecast alerts in day
/// order. Every call builds a fresh list.
pub fn detect_alerts(current: Option<&CurrentConditions>, forecast: &[ForecastDay]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(current) = current {
        alerts.extend(current_alerts(current));
    }

    for (index, day) in forecast.iter().take(FORECAST_WINDOW).enumerate() {
        alerts.extend(forecast_alerts(index, day));
    }

    alerts
}

fn current_alerts(current: &CurrentConditions) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let temp = current.temperature;
    let condition = current.description.to_lowercase();

    if temp > CURRENT_HEAT_C {
        alerts.push(Alert::current(
            AlertKind::ExtremeHeat,
            Severity::High,
            format!("Extreme heat warning: {temp}°C"),
        ));
    }
    if temp < CURRENT_FREEZE_C {
        alerts.push(Alert::current(
            AlertKind::Freezing,
            Severity::High,
            format!("Freezing conditions: {temp}°C"),
        ));
    }
    if condition.contains("thunderstorm") {
        alerts.push(Alert::current(
            AlertKind::Thunderstorm,
            Severity::High,
            "Thunderstorm in progress".to_string(),
        ));
    }
    if condition.contains("heavy rain") {
        alerts.push(Alert::current(
            AlertKind::HeavyRain,
            Severity::Medium,
            "Heavy rainfall detected".to_string(),
        ));
    }
    if current.wind_speed > HIGH_WIND_KMH {
        alerts.push(Alert::current(
            AlertKind::HighWind,
            Severity::Medium,
            format!("High winds: {} km/h", current.wind_speed),
        ));
    }

    alerts
}

fn forecast_alerts(index: usize, day: &ForecastDay) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let condition = day.description.to_lowercase();

    if day.high > FORECAST_HEAT_C {
        alerts.push(Alert::forecast(
            AlertKind::ExtremeHeat,
            index,
            Severity::Medium,
            format!("Extreme heat forecast for {}: {}°C", day.day, day.high),
        ));
    }
    if day.low < FORECAST_FREEZE_C {
        alerts.push(Alert::forecast(
            AlertKind::Freezing,
            index,
            Severity::Medium,
            format!("Freezing conditions forecast for {}: {}°C", day.day, day.low),
        ));
    }
    if condition.contains("thunderstorm") {
        alerts.push(Alert::forecast(
            AlertKind::Thunderstorm,
            index,
            Severity::Medium,
            format!("Thunderstorm forecast for {}", day.day),
        ));
    }
    if condition.contains("heavy rain") {
        alerts.push(Alert::forecast(
            AlertKind::HeavyRain,
            index,
            Severity::Low,
            format!("Heavy rain forecast for {}", day.day),
        ));
    }

    alerts
}
