use anyhow::Context;
use std::fmt;
use std::path::Path;
pub(crate) use travel_types::settings::AdvisorSettings;
use travel_types::settings::MAX_FORECAST_ENTRIES;

use crate::cli::Args;

pub(crate) const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub(crate) const GOOGLE_PLACES_API_KEY: &str = "GOOGLE_PLACES_API_KEY";
pub(crate) const WEATHER_API_KEY: &str = "WEATHER_API_KEY";

#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) openai_api_key: String,
    pub(crate) places_api_key: String,
    pub(crate) weather_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("places_api_key", &"<redacted>")
            .field("weather_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> anyhow::Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => {
                    tracing::error!("Missing required environment variable: {key}");
                    anyhow::bail!("Missing environment variable: {key}")
                }
            }
        };
        Ok(Self {
            openai_api_key: require(OPENAI_API_KEY)?,
            places_api_key: require(GOOGLE_PLACES_API_KEY)?,
            weather_api_key: require(WEATHER_API_KEY)?,
        })
    }
}

fn validate_settings(settings: &AdvisorSettings) -> anyhow::Result<()> {
    if settings.agent.max_turns == 0 {
        anyhow::bail!("agent.max_turns must be at least 1");
    }
    let entries = settings.weather.forecast_entries;
    if entries == 0 || entries > MAX_FORECAST_ENTRIES {
        anyhow::bail!(
            "weather.forecast_entries must be between 1 and {MAX_FORECAST_ENTRIES}, got {entries}"
        );
    }
    for (label, url) in [
        ("openai.base_url", &settings.openai.base_url),
        ("weather.base_url", &settings.weather.base_url),
        ("places.base_url", &settings.places.base_url),
    ] {
        if url.trim().is_empty() {
            anyhow::bail!("{label} must not be empty");
        }
    }
    Ok(())
}

pub(crate) fn load_settings(path: Option<&Path>) -> anyhow::Result<AdvisorSettings> {
    let Some(path) = path else {
        return Ok(AdvisorSettings::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let settings: AdvisorSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Command line flags win over the settings file.
pub(crate) fn apply_overrides(
    mut settings: AdvisorSettings,
    args: &Args,
) -> anyhow::Result<AdvisorSettings> {
    if let Some(model) = args.model.as_ref().filter(|m| !m.trim().is_empty()) {
        settings.openai.model = model.trim().to_string();
    }
    if let Some(max_turns) = args.max_turns {
        settings.agent.max_turns = max_turns;
    }
    validate_settings(&settings)?;
    Ok(settings)
}
