//! Raw provider payloads → dashboard records.
//!
//! Everything here is pure: no I/O, no clock, no hidden state. Operations that
//! depend on the viewer's wall clock come in two flavours, one using
//! [`chrono::Local`] and an `_in` variant taking an explicit time zone.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::{
    icon::weather_icon,
    model::{
        AirQuality, CitySuggestion, CurrentConditions, ForecastDay, HourlyPoint, RawAirPollution,
        RawCitySearch, RawCondition, RawCurrentWeather, RawForecast,
    },
};

/// Days kept by [`transform_forecast`].
pub const FORECAST_DAYS: usize = 5;
/// Three-hour buckets kept by [`transform_hourly`] (~24h).
pub const HOURLY_POINTS: usize = 8;

const MPS_TO_KMH: f64 = 3.6;

/// Round half up, toward positive infinity (`-2.5 → -2`, `2.5 → 3`).
pub fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // `round` breaks ties away from zero; negative ties go back up.
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

pub fn transform_current_weather(raw: Option<&RawCurrentWeather>) -> Option<CurrentConditions> {
    let raw = raw?;
    let main = raw.main.as_ref()?;
    let (temp, feels_like) = (main.temp?, main.feels_like?);

    let city = raw
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown");
    let location = match raw.sys.as_ref().and_then(|sys| sys.country.as_deref()) {
        Some(cc) if !cc.is_empty() => format!("{city}, {cc}"),
        _ => city.to_string(),
    };

    let wind_speed = raw
        .wind
        .as_ref()
        .and_then(|wind| wind.speed)
        .map(|mps| round_half_up(mps * MPS_TO_KMH))
        .unwrap_or(0);
    let visibility = raw
        .visibility
        .map(|meters| round_half_up(meters / 1000.0))
        .unwrap_or(0);

    let condition = raw.weather.first();
    let offset = raw.timezone.unwrap_or(0);
    let sys = raw.sys.as_ref();

    Some(CurrentConditions {
        location,
        temperature: round_half_up(temp),
        feels_like: round_half_up(feels_like),
        humidity: main.humidity,
        wind_speed,
        pressure: main.pressure,
        visibility,
        uv_index: raw.uvi.unwrap_or(0.0),
        description: description_of(condition),
        weather_icon: icon_of(condition),
        sunrise: location_clock(sys.and_then(|s| s.sunrise), offset),
        sunset: location_clock(sys.and_then(|s| s.sunset), offset),
    })
}

/// Renders `timestamp` as "HH:MM" on the wall clock of a place `offset_secs`
/// away from UTC. A missing or zero timestamp yields `None`.
pub fn location_clock(timestamp: Option<i64>, offset_secs: i64) -> Option<String> {
    let ts = timestamp.filter(|ts| *ts != 0)?;
    let shifted = DateTime::from_timestamp(ts.checked_add(offset_secs)?, 0)?;
    Some(shifted.format("%H:%M").to_string())
}

pub fn transform_forecast(raw: &RawForecast) -> Vec<ForecastDay> {
    transform_forecast_in(raw, &Local)
}

/// Groups three-hourly samples into calendar days as seen from `tz`.
pub fn transform_forecast_in<Tz>(raw: &RawForecast, tz: &Tz) -> Vec<ForecastDay>
where
    Tz: TimeZone,
{
    struct Bucket<'a> {
        date: NaiveDate,
        temps: Vec<f64>,
        condition: Option<&'a RawCondition>,
    }

    let mut buckets: Vec<Bucket<'_>> = Vec::new();
    for entry in &raw.list {
        let Some(date) = tz.timestamp_opt(entry.dt, 0).single().map(|dt| dt.date_naive()) else {
            continue;
        };

        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.temps.push(entry.main.temp),
            None => buckets.push(Bucket {
                date,
                temps: vec![entry.main.temp],
                condition: entry.weather.first(),
            }),
        }
    }

    buckets
        .into_iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(index, bucket)| {
            let high = bucket.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let low = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
            let day = if index == 0 {
                "Tomorrow".to_string()
            } else {
                bucket.date.format("%A").to_string()
            };

            ForecastDay {
                day,
                high: round_half_up(high),
                low: round_half_up(low),
                icon: icon_of(bucket.condition),
                description: description_of(bucket.condition),
            }
        })
        .collect()
}

pub fn transform_hourly(raw: &RawForecast) -> Vec<HourlyPoint> {
    transform_hourly_in(raw, &Local)
}

/// First [`HOURLY_POINTS`] samples, labelled with the hour on `tz`'s clock.
pub fn transform_hourly_in<Tz>(raw: &RawForecast, tz: &Tz) -> Vec<HourlyPoint>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    raw.list
        .iter()
        .take(HOURLY_POINTS)
        .map(|entry| HourlyPoint {
            time_label: tz
                .timestamp_opt(entry.dt, 0)
                .single()
                .map(|dt| dt.format("%H").to_string())
                .unwrap_or_default(),
            temp: round_half_up(entry.main.temp),
        })
        .collect()
}

/// Latest pollution snapshot, passed through untouched.
pub fn transform_air_quality(raw: &RawAirPollution) -> Option<AirQuality> {
    raw.list.first().map(|snapshot| AirQuality {
        aqi: snapshot.main.aqi,
        components: snapshot.components,
        measured_at: snapshot.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}

pub fn transform_city_search(raw: &RawCitySearch) -> Vec<CitySuggestion> {
    raw.list
        .iter()
        .map(|city| CitySuggestion {
            name: city.name.clone(),
            country: city
                .sys
                .as_ref()
                .and_then(|sys| sys.country.clone())
                .filter(|cc| !cc.is_empty()),
            coordinates: city.coord,
            temperature: city.main.as_ref().map(|main| round_half_up(main.temp)),
        })
        .collect()
}

fn icon_of(condition: Option<&RawCondition>) -> String {
    weather_icon(condition.and_then(|c| c.main.as_deref())).to_string()
}

fn description_of(condition: Option<&RawCondition>) -> String {
    condition
        .and_then(|c| c.description.clone())
        .unwrap_or_default()
}
