use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdvisorSettings {
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub places: PlacesSettings,
    #[serde(default)]
    pub agent: AgentSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub chat_path: String,
    pub model: String,
    pub guardrail_model: String,
    pub search_model: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            chat_path: "/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            guardrail_model: "gpt-4o-mini".to_string(),
            search_model: "gpt-4o-mini-search-preview".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    /// Number of 3-hour slots to keep, at most [`MAX_FORECAST_ENTRIES`].
    pub forecast_entries: usize,
}

/// Eight 3-hour slots cover the next 24 hours.
pub const MAX_FORECAST_ENTRIES: usize = 8;

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: "http://api.openweathermap.org".to_string(),
            forecast_entries: MAX_FORECAST_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacesSettings {
    pub base_url: String,
}

impl Default for PlacesSettings {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    pub max_turns: usize,
    pub request_timeout_secs: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_turns: 10,
            request_timeout_secs: 120,
        }
    }
}
