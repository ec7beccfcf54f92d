//! Plain-text rendering of dashboard data.

use chrono::Local;
use weatherdash_core::{
    AirQuality, AqiLevel, CitySuggestion, CurrentConditions, DashboardSnapshot, Favorite,
    ForecastDay, HourlyPoint, Severity,
};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut lines = Vec::new();

    match &snapshot.current {
        Some(current) => lines.extend(current_lines(current)),
        None => lines.push("No current conditions available.".to_string()),
    }

    if !snapshot.alerts.is_empty() {
        lines.push(String::new());
        lines.push("Alerts".to_string());
        for alert in &snapshot.alerts {
            lines.push(format!("  {} {}", severity_badge(alert.severity), alert.message));
        }
    }

    if !snapshot.forecast.is_empty() {
        lines.push(String::new());
        lines.push("5-day forecast".to_string());
        lines.extend(snapshot.forecast.iter().map(forecast_line));
    }

    if !snapshot.hourly.is_empty() {
        lines.push(String::new());
        lines.push("Next 24h (°C)".to_string());
        lines.extend(hourly_lines(&snapshot.hourly));
    }

    lines.push(String::new());
    match &snapshot.air_quality {
        Some(aq) => lines.extend(air_quality_lines(aq)),
        None => lines.push("Air quality: no AQI data".to_string()),
    }

    lines.join("\n")
}

fn current_lines(current: &CurrentConditions) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", current.weather_icon, current.location),
        format!(
            "  {}°C, feels like {}°C, {}",
            current.temperature, current.feels_like, current.description
        ),
        format!(
            "  Humidity {}%  Wind {} km/h  Pressure {} hPa  Visibility {} km  UV {}",
            current.humidity, current.wind_speed, current.pressure, current.visibility, current.uv_index
        ),
    ];

    if current.sunrise.is_some() || current.sunset.is_some() {
        lines.push(format!(
            "  Sunrise {}  Sunset {}",
            current.sunrise.as_deref().unwrap_or("--:--"),
            current.sunset.as_deref().unwrap_or("--:--"),
        ));
    }

    lines
}

fn forecast_line(day: &ForecastDay) -> String {
    format!(
        "  {:<10} {} {:>4}° / {:>4}°  {}",
        day.day, day.icon, day.high, day.low, day.description
    )
}

fn hourly_lines(hourly: &[HourlyPoint]) -> Vec<String> {
    let labels: Vec<_> = hourly.iter().map(|p| format!("{:>4}", p.time_label)).collect();
    let temps: Vec<_> = hourly.iter().map(|p| format!("{:>4}", p.temp)).collect();
    let bars: Vec<_> = sparkline(hourly).chars().map(|c| format!("{c:>4}")).collect();

    vec![
        format!("  {}", labels.join("")),
        format!("  {}", bars.join("")),
        format!("  {}", temps.join("")),
    ]
}

/// One block character per point, scaled between the series min and max.
pub fn sparkline(points: &[HourlyPoint]) -> String {
    let (Some(min), Some(max)) = (
        points.iter().map(|p| p.temp).min(),
        points.iter().map(|p| p.temp).max(),
    ) else {
        return String::new();
    };

    let span = (max - min).max(1) as f64;
    let top = (SPARK.len() - 1) as f64;
    points
        .iter()
        .map(|p| SPARK[(((p.temp - min) as f64 / span) * top).round() as usize])
        .collect()
}

fn air_quality_lines(aq: &AirQuality) -> Vec<String> {
    let level = AqiLevel::from_index(aq.aqi)
        .map(|level| level.label())
        .unwrap_or("Unknown");
    let pollutant = |name: &str, value: Option<f64>| {
        value.map(|v| format!("{name} {v:.1} μg/m³"))
    };

    let components: Vec<_> = [
        pollutant("PM2.5", aq.components.pm2_5),
        pollutant("PM10", aq.components.pm10),
        pollutant("NO₂", aq.components.no2),
        pollutant("O₃", aq.components.o3),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut lines = vec![format!("Air quality: {} ({level})", aq.aqi)];
    if !components.is_empty() {
        lines.push(format!("  {}", components.join("  ")));
    }
    lines
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[HIGH]",
        Severity::Medium => "[MED] ",
        Severity::Low => "[LOW] ",
    }
}

pub fn cities(cities: &[CitySuggestion]) -> String {
    if cities.is_empty() {
        return "No matching cities.".to_string();
    }

    cities
        .iter()
        .map(|city| {
            let mut line = city.display_name();
            if let Some(coords) = city.coordinates {
                line.push_str(&format!("  ({:.2}, {:.2})", coords.lat, coords.lon));
            }
            if let Some(temp) = city.temperature {
                line.push_str(&format!("  {temp}°C"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn favorites(favorites: &[Favorite]) -> String {
    if favorites.is_empty() {
        return "No favorites yet. Add one with `weatherdash favorites add <city>`.".to_string();
    }

    favorites
        .iter()
        .map(|fav| {
            format!(
                "{} {}  {}°C {}  [id: {}, added {}]",
                fav.weather_icon,
                fav.location,
                fav.temperature,
                fav.description,
                fav.id,
                fav.added_at.with_timezone(&Local).format("%Y-%m-%d"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
