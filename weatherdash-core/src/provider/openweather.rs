use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Config,
    model::{Coordinates, RawAirPollution, RawCitySearch, RawCurrentWeather, RawForecast},
};

use super::{LocationQuery, WeatherProvider};

/// Matches returned by the city search endpoint.
const SEARCH_LIMIT: &str = "5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::new(api_key.to_owned(), config.base_url(), config.timeout())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "requesting OpenWeather {what}");

        params.push(("appid", self.api_key.clone()));

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }
}

fn metric(mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
    params.push(("units", "metric".to_string()));
    params
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &LocationQuery) -> Result<RawCurrentWeather> {
        self.get_json("/weather", metric(query.query_params()), "current weather")
            .await
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<RawForecast> {
        self.get_json("/forecast", metric(query.query_params()), "forecast")
            .await
    }

    async fn air_pollution(&self, coords: Coordinates) -> Result<RawAirPollution> {
        let params = LocationQuery::Coordinates(coords).query_params();
        self.get_json("/air_pollution", params, "air quality").await
    }

    async fn search_cities(&self, query: &str) -> Result<RawCitySearch> {
        let params = metric(vec![
            ("q", query.trim().to_string()),
            ("type", "like".to_string()),
            ("sort", "population".to_string()),
            ("cnt", SEARCH_LIMIT.to_string()),
        ]);
        self.get_json("/find", params, "city search").await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new("test_key".into(), &server.uri(), Duration::from_secs(5))
            .expect("client builds")
    }

    #[tokio::test]
    async fn current_weather_by_city() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Paris",
                "main": { "temp": 21.3, "feels_like": 20.9, "humidity": 60, "pressure": 1015 },
                "weather": [{ "main": "Clouds", "description": "scattered clouds" }],
                "coord": { "lat": 48.85, "lon": 2.35 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let query = LocationQuery::city("Paris").unwrap();
        let raw = provider(&mock_server).current_weather(&query).await.unwrap();

        assert_eq!(raw.name.as_deref(), Some("Paris"));
        assert_eq!(raw.coord, Some(Coordinates { lat: 48.85, lon: 2.35 }));
    }

    #[tokio::test]
    async fn forecast_by_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "10.5"))
            .and(query_param("lon", "-66.9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    { "dt": 1_700_006_400, "main": { "temp": 25.0 }, "weather": [] },
                    { "dt": 1_700_017_200, "main": { "temp": 27.5 }, "weather": [] }
                ]
            })))
            .mount(&mock_server)
            .await;

        let query = LocationQuery::coordinates(10.5, -66.9).unwrap();
        let raw = provider(&mock_server).forecast(&query).await.unwrap();

        assert_eq!(raw.list.len(), 2);
    }

    #[tokio::test]
    async fn air_pollution_by_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .and(query_param("lat", "1.5"))
            .and(query_param("lon", "2.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [{ "main": { "aqi": 3 }, "components": { "pm10": 40.2 } }]
            })))
            .mount(&mock_server)
            .await;

        let raw = provider(&mock_server)
            .air_pollution(Coordinates { lat: 1.5, lon: 2.5 })
            .await
            .unwrap();

        assert_eq!(raw.list[0].main.aqi, 3);
        assert_eq!(raw.list[0].components.pm10, Some(40.2));
    }

    #[tokio::test]
    async fn city_search_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/find"))
            .and(query_param("q", "Spring"))
            .and(query_param("type", "like"))
            .and(query_param("sort", "population"))
            .and(query_param("cnt", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [{ "name": "Springfield", "sys": { "country": "US" } }]
            })))
            .mount(&mock_server)
            .await;

        let raw = provider(&mock_server).search_cities(" Spring ").await.unwrap();
        assert_eq!(raw.list[0].name, "Springfield");
    }

    #[tokio::test]
    async fn error_status_carries_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"cod":"404","message":"city not found"}"#),
            )
            .mount(&mock_server)
            .await;

        let query = LocationQuery::city("Atlantis").unwrap();
        let err = provider(&mock_server).current_weather(&query).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("city not found"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let query = LocationQuery::city("Paris").unwrap();
        let err = provider(&mock_server).forecast(&query).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse OpenWeather forecast JSON"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(250);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
