use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod settings;

pub const NO_NAME: &str = "No name provided";
pub const NO_ADDRESS: &str = "No address provided";
pub const NO_BUSINESS_STATUS: &str = "No business status provided";

/// Verdict of the input topic classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputScanResult {
    pub is_off_topic: bool,
    pub reason: String,
}

/// Verdict of the output tone classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputScanResult {
    pub contains_profanity: bool,
    pub explanation: String,
}

/// One place returned by the places search, in the shape handed to the model.
///
/// Optional fields serialize as `null` so every record carries the same keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceOfInterest {
    pub name: String,
    pub description: String,
    pub business_status: Option<String>,
    pub opening_hours: Option<Value>,
    pub rating: Option<f64>,
    pub types: Option<Vec<String>>,
    pub user_ratings_total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherForecastEntry {
    pub time: String,
    pub description: String,
    pub temp: String,
}

impl WeatherForecastEntry {
    pub fn new(
        time: impl Into<String>,
        description: impl Into<String>,
        temp_celsius: impl std::fmt::Display,
    ) -> Self {
        Self {
            time: time.into(),
            description: description.into(),
            temp: format!("{temp_celsius}°C"),
        }
    }

    /// Sentinel entry returned in place of a forecast when the lookup fails.
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            time: String::new(),
            description: format!("Parsing error: {message}"),
            temp: String::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.time.is_empty() && self.temp.is_empty()
    }
}
