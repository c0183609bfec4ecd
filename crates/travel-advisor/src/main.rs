mod agent;
mod app;
mod cli;
mod config;
mod error;
mod guardrails;
mod http;
mod logging;
mod openai;
mod prompts;
#[cfg(test)]
mod test_support;
mod tools;

use crate::agent::{AgentDefinition, Runner};
use crate::cli::Args;
use crate::config::{apply_overrides, load_settings, AdvisorSettings, Credentials};
use crate::guardrails::{InputGuardrail, OutputGuardrail};
use crate::http::build_http_client;
use crate::logging::init_tracing;
use crate::openai::{ChatModel, OpenAiClient, OpenAiConfig};
use crate::prompts::{ADVISOR_INSTRUCTIONS, ADVISOR_NAME};
use crate::tools::{
    FindPlacesOfInterest, GetWeatherForecast, PlacesClient, ToolRegistry, WeatherClient,
    WebSearch,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let file_guard = init_tracing(&args.log_dir, &args.log_file, args.log_to_stderr)?;

    let credentials = Credentials::from_env()?;
    let settings = apply_overrides(load_settings(args.config.as_deref())?, &args)?;
    let runner = build_runner(&settings, credentials)?;

    let city = {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        app::read_city(args.city.as_deref(), &mut stdin.lock(), &mut stdout)?
    };

    let code = app::run_session(&city, &runner, &mut std::io::stdout()).await?;
    if code != 0 {
        drop(file_guard);
        std::process::exit(code);
    }
    Ok(())
}

fn build_runner(settings: &AdvisorSettings, credentials: Credentials) -> anyhow::Result<Runner> {
    let http_client = build_http_client(settings.agent.request_timeout_secs)?;

    let model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::new(
        OpenAiConfig {
            base_url: settings.openai.base_url.clone(),
            chat_path: settings.openai.chat_path.clone(),
            api_key: credentials.openai_api_key,
            timeout_secs: settings.agent.request_timeout_secs,
        },
        http_client.clone(),
    ));

    let mut tools = ToolRegistry::new();
    tools.register(GetWeatherForecast::new(WeatherClient::new(
        http_client.clone(),
        &settings.weather,
        credentials.weather_api_key,
    )));
    tools.register(FindPlacesOfInterest::new(PlacesClient::new(
        http_client,
        &settings.places,
        credentials.places_api_key,
    )));
    tools.register(WebSearch::new(
        Arc::clone(&model),
        settings.openai.search_model.clone(),
    ));

    let agent = AgentDefinition {
        name: ADVISOR_NAME.to_string(),
        instructions: ADVISOR_INSTRUCTIONS.to_string(),
        model: settings.openai.model.clone(),
    };

    Ok(Runner::new(
        Arc::clone(&model),
        agent,
        tools,
        InputGuardrail::new(Arc::clone(&model), settings.openai.guardrail_model.clone()),
        OutputGuardrail::new(model, settings.openai.guardrail_model.clone()),
        settings.agent.max_turns,
    ))
}
