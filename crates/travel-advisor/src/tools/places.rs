use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use travel_types::settings::PlacesSettings;
use travel_types::{PlaceOfInterest, NO_ADDRESS, NO_BUSINESS_STATUS, NO_NAME};

use super::{optional_str, required_str, Tool};
use crate::http::join_base_path;

const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
    formatted_address: Option<String>,
    business_status: Option<String>,
    opening_hours: Option<Value>,
    rating: Option<f64>,
    types: Option<Vec<String>>,
    user_ratings_total: Option<u64>,
}

impl From<RawPlace> for PlaceOfInterest {
    fn from(raw: RawPlace) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| NO_NAME.to_string()),
            description: raw
                .formatted_address
                .unwrap_or_else(|| NO_ADDRESS.to_string()),
            business_status: Some(
                raw.business_status
                    .unwrap_or_else(|| NO_BUSINESS_STATUS.to_string()),
            ),
            opening_hours: raw.opening_hours,
            rating: raw.rating,
            types: raw.types,
            user_ratings_total: raw.user_ratings_total,
        }
    }
}

pub(crate) fn build_query(city: &str, interests: Option<&str>) -> String {
    let mut query = format!("{city} points of interest");
    if let Some(interests) = interests {
        query.push(' ');
        query.push_str(interests);
    }
    query.trim().to_string()
}

pub(crate) struct PlacesClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl PlacesClient {
    pub(crate) fn new(http_client: Client, settings: &PlacesSettings, api_key: String) -> Self {
        Self {
            http_client,
            base_url: settings.base_url.clone(),
            api_key,
        }
    }

    /// Places matching the city and interests; empty on any upstream failure.
    pub(crate) async fn find(&self, city: &str, interests: Option<&str>) -> Vec<PlaceOfInterest> {
        tracing::info!("Finding places of interest in {city}...");
        let query = build_query(city, interests);
        match self.search(&query).await {
            Ok(places) => {
                for place in &places {
                    tracing::info!("Found: {} - {}", place.name, place.description);
                }
                tracing::info!("Found {} places of interest in {city}.", places.len());
                places
            }
            Err(err) => {
                tracing::error!("Google Places API error: {err:#}");
                Vec::new()
            }
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<Vec<PlaceOfInterest>> {
        let url = join_base_path(&self.base_url, TEXT_SEARCH_PATH)?;
        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query), ("key", self.api_key.as_str())])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| anyhow::anyhow!("request error: {}", err.without_url()))?;
        let body: TextSearchResponse = response
            .json()
            .await
            .map_err(|err| anyhow::anyhow!("invalid response: {}", err.without_url()))?;
        places_from_response(body)
    }
}

fn places_from_response(body: TextSearchResponse) -> anyhow::Result<Vec<PlaceOfInterest>> {
    match body.status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(body.results.into_iter().map(Into::into).collect()),
        status => match body.error_message {
            Some(message) => anyhow::bail!("{status} ({message})"),
            None => anyhow::bail!("{status}"),
        },
    }
}

pub(crate) struct FindPlacesOfInterest {
    client: PlacesClient,
}

impl FindPlacesOfInterest {
    pub(crate) fn new(client: PlacesClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FindPlacesOfInterest {
    fn name(&self) -> &'static str {
        "find_places_of_interest"
    }

    fn description(&self) -> &'static str {
        "Find points of interest in a city, optionally narrowed by the traveller's interests."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {"type": "string", "description": "Destination city name."},
                "weather": {
                    "type": ["string", "null"],
                    "description": "Short summary of the expected weather."
                },
                "interests": {
                    "type": ["string", "null"],
                    "description": "Extra search terms such as museums or parks."
                }
            },
            "required": ["city"],
            "additionalProperties": false,
        })
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let city = required_str(&args, "city")?;
        if let Some(weather) = optional_str(&args, "weather") {
            tracing::debug!("places lookup for {city} with weather hint: {weather}");
        }
        let interests = optional_str(&args, "interests");
        let places = self.client.find(&city, interests.as_deref()).await;
        Ok(serde_json::to_value(places)?)
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

    fn client_for(base_url: String) -> PlacesClient {
        PlacesClient::new(
            Client::new(),
            &PlacesSettings { base_url },
            "g-key".to_string(),
        )
    }

    fn app_returning(body: Value) -> Router {
        Router::new().route(
            TEXT_SEARCH_PATH,
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        )
    }

    #[test]
    fn query_appends_interests() {
        assert_eq!(build_query("Lisbon", None), "Lisbon points of interest");
        assert_eq!(
            build_query("Lisbon", Some("museums")),
            "Lisbon points of interest museums"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let raw: RawPlace = serde_json::from_value(json!({"rating": 4.2})).unwrap();
        let place = PlaceOfInterest::from(raw);
        assert_eq!(place.name, NO_NAME);
        assert_eq!(place.description, NO_ADDRESS);
        assert_eq!(place.business_status.as_deref(), Some(NO_BUSINESS_STATUS));
        assert_eq!(place.rating, Some(4.2));
        assert!(place.types.is_none());
    }

    #[test]
    fn zero_results_is_not_an_error() {
        let body: TextSearchResponse =
            serde_json::from_value(json!({"results": [], "status": "ZERO_RESULTS"})).unwrap();
        assert!(places_from_response(body).unwrap().is_empty());
    }

    #[tokio::test]
    async fn maps_text_search_results() {
        let app = Router::new().route(
            TEXT_SEARCH_PATH,
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("key").map(String::as_str), Some("g-key"));
                assert_eq!(
                    params.get("query").map(String::as_str),
                    Some("Lisbon points of interest towers")
                );
                Json(json!({
                    "status": "OK",
                    "results": [{
                        "name": "Belém Tower",
                        "formatted_address": "Av. Brasília, Lisboa",
                        "business_status": "OPERATIONAL",
                        "opening_hours": {"open_now": true},
                        "rating": 4.6,
                        "types": ["tourist_attraction", "point_of_interest"],
                        "user_ratings_total": 90210,
                    }]
                }))
            }),
        );
        let base = spawn_server(app).await;
        let places = client_for(base).find("Lisbon", Some("towers")).await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Belém Tower");
        assert_eq!(places[0].description, "Av. Brasília, Lisboa");
        assert_eq!(places[0].opening_hours, Some(json!({"open_now": true})));
        assert_eq!(places[0].user_ratings_total, Some(90210));
    }

    #[tokio::test]
    async fn denied_request_returns_empty_list() {
        let base = spawn_server(app_returning(json!({
            "results": [],
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .await;
        assert!(client_for(base).find("Lisbon", None).await.is_empty());
    }

    #[tokio::test]
    async fn server_error_returns_empty_list() {
        let app = Router::new().route(
            TEXT_SEARCH_PATH,
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn_server(app).await;
        assert!(client_for(base).find("Lisbon", None).await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_returns_empty_list() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let places = client_for(format!("http://{addr}")).find("Lisbon", None).await;
        assert!(places.is_empty());
    }
}
