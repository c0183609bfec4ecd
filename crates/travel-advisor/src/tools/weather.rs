use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use travel_types::settings::{WeatherSettings, MAX_FORECAST_ENTRIES};
use travel_types::WeatherForecastEntry;

use super::{required_str, Tool};
use crate::http::join_base_path;

const FORECAST_PATH: &str = "/data/2.5/forecast";
/// Temperatures are always reported in Celsius.
const UNITS: &str = "metric";

pub(crate) struct WeatherClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    max_entries: usize,
}

impl WeatherClient {
    pub(crate) fn new(http_client: Client, settings: &WeatherSettings, api_key: String) -> Self {
        Self {
            http_client,
            base_url: settings.base_url.clone(),
            api_key,
            max_entries: settings.forecast_entries.clamp(1, MAX_FORECAST_ENTRIES),
        }
    }

    /// Forecast for the next few 3-hour slots, or a single sentinel entry on failure.
    pub(crate) async fn forecast(&self, city: &str) -> Vec<WeatherForecastEntry> {
        tracing::info!("Fetching weather forecast for {city}...");
        match self.fetch(city).await {
            Ok(entries) => {
                tracing::info!("Fetched {} forecast entries for {city}.", entries.len());
                entries
            }
            Err(err) => {
                tracing::error!("Weather forecast error for {city}: {err:#}");
                vec![WeatherForecastEntry::error(format!("{err:#}"))]
            }
        }
    }

    async fn fetch(&self, city: &str) -> anyhow::Result<Vec<WeatherForecastEntry>> {
        let url = join_base_path(&self.base_url, FORECAST_PATH)?;
        // reqwest errors carry the url, which holds the api key.
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", UNITS),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| anyhow::anyhow!("Request error: {}", err.without_url()))?;
        let data: Value = response
            .json()
            .await
            .map_err(|err| anyhow::anyhow!("Request error: {}", err.without_url()))?;
        parse_forecast(&data, self.max_entries)
    }
}

fn cod_is_ok(cod: Option<&Value>) -> bool {
    match cod {
        Some(Value::String(code)) => code == "200",
        Some(Value::Number(code)) => code.as_u64() == Some(200),
        _ => false,
    }
}

pub(crate) fn parse_forecast(
    data: &Value,
    max_entries: usize,
) -> anyhow::Result<Vec<WeatherForecastEntry>> {
    if !cod_is_ok(data.get("cod")) {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        anyhow::bail!("API error: {message}");
    }
    let list = data
        .get("list")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    list.iter()
        .take(max_entries)
        .enumerate()
        .map(|(index, item)| parse_entry(item).with_context(|| format!("list[{index}]")))
        .collect()
}

fn parse_entry(item: &Value) -> anyhow::Result<WeatherForecastEntry> {
    let time = item
        .get("dt_txt")
        .and_then(Value::as_str)
        .filter(|time| !time.is_empty())
        .context("missing dt_txt")?;
    let description = item
        .pointer("/weather/0/description")
        .and_then(Value::as_str)
        .filter(|description| !description.is_empty())
        .context("missing weather[0].description")?;
    let temp = match item.pointer("/main/temp") {
        Some(Value::Number(temp)) => temp.clone(),
        _ => anyhow::bail!("missing main.temp"),
    };
    Ok(WeatherForecastEntry::new(time, description, temp))
}

pub(crate) struct GetWeatherForecast {
    client: WeatherClient,
}

impl GetWeatherForecast {
    pub(crate) fn new(client: WeatherClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetWeatherForecast {
    fn name(&self) -> &'static str {
        "get_weather_forecast"
    }

    fn description(&self) -> &'static str {
        "Fetch the weather forecast for a city for the next 24 hours in 3-hour steps."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {"type": "string", "description": "Destination city name."}
            },
            "required": ["city"],
            "additionalProperties": false,
        })
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let city = required_str(&args, "city")?;
        let entries = self.client.forecast(&city).await;
        Ok(serde_json::to_value(entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_server;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    fn slot(hour: u32, description: &str, temp: f64) -> Value {
        json!({
            "dt": 1_700_000_000 + hour * 3600,
            "dt_txt": format!("2024-05-01 {hour:02}:00:00"),
            "main": {"temp": temp, "humidity": 70},
            "weather": [{"main": "Rain", "description": description}],
        })
    }

    fn forecast_body(slots: usize) -> Value {
        let list: Vec<Value> = (0..slots)
            .map(|i| slot((i as u32 * 3) % 24, "light rain", 10.5 + i as f64))
            .collect();
        json!({"cod": "200", "message": 0, "cnt": slots, "list": list})
    }

    fn client_for(base_url: String) -> WeatherClient {
        let settings = WeatherSettings {
            base_url,
            ..WeatherSettings::default()
        };
        WeatherClient::new(Client::new(), &settings, "w-key".to_string())
    }

    #[test]
    fn keeps_first_eight_slots() {
        let entries = parse_forecast(&forecast_body(40), 8).expect("parse");
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[0].time, "2024-05-01 00:00:00");
        assert_eq!(entries[0].description, "light rain");
        assert_eq!(entries[0].temp, "10.5°C");
        assert!(entries
            .iter()
            .all(|e| !e.time.is_empty() && !e.description.is_empty() && !e.temp.is_empty()));
    }

    #[test]
    fn short_list_is_returned_whole() {
        let entries = parse_forecast(&forecast_body(3), 8).expect("parse");
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn api_error_code_uses_upstream_message() {
        let err = parse_forecast(&json!({"cod": "404", "message": "city not found"}), 8)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: city not found");
        let err = parse_forecast(&json!({"cod": 401}), 8).unwrap_err();
        assert_eq!(err.to_string(), "API error: Unknown error");
    }

    #[test]
    fn missing_field_is_parse_error() {
        let mut body = forecast_body(2);
        body["list"][1]["weather"] = json!([]);
        let err = parse_forecast(&body, 8).unwrap_err();
        assert!(format!("{err:#}").contains("weather[0].description"));
    }

    #[tokio::test]
    async fn forecast_sends_metric_query() {
        let app = Router::new().route(
            "/data/2.5/forecast",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("q").map(String::as_str) != Some("São Paulo")
                    || params.get("units").map(String::as_str) != Some("metric")
                    || params.get("appid").map(String::as_str) != Some("w-key")
                {
                    return Json(json!({"cod": "400", "message": "bad query"}));
                }
                Json(forecast_body(16))
            }),
        );
        let base = spawn_server(app).await;
        let entries = client_for(base).forecast("São Paulo").await;
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|e| !e.is_error()));
    }

    #[tokio::test]
    async fn oversized_window_still_returns_one_day_in_celsius() {
        let app = Router::new().route(
            "/data/2.5/forecast",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("units").map(String::as_str), Some("metric"));
                Json(forecast_body(40))
            }),
        );
        let base = spawn_server(app).await;
        let settings = WeatherSettings {
            base_url: base,
            forecast_entries: 40,
        };
        let client = WeatherClient::new(Client::new(), &settings, "w-key".to_string());
        let entries = client.forecast("Oslo").await;
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|e| e.temp.ends_with("°C")));
    }

    #[tokio::test]
    async fn http_failure_yields_single_sentinel() {
        let app = Router::new().route(
            "/data/2.5/forecast",
            get(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = spawn_server(app).await;
        let entries = client_for(base).forecast("Oslo").await;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_error());
        assert!(entries[0].description.starts_with("Parsing error: Request error"));
        assert!(!entries[0].description.contains("w-key"));
    }

    #[tokio::test]
    async fn tool_requires_city() {
        let tool = GetWeatherForecast::new(client_for("http://127.0.0.1:9".to_string()));
        assert!(tool.invoke(json!({})).await.is_err());
    }
}
