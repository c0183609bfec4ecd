mod places;
mod weather;
mod web_search;

pub(crate) use places::{FindPlacesOfInterest, PlacesClient};
pub(crate) use weather::{GetWeatherForecast, WeatherClient};
pub(crate) use web_search::WebSearch;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::openai::{ToolDefinition, ToolFunction};

#[async_trait]
pub(crate) trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> Value;

    async fn invoke(&self, args: Value) -> anyhow::Result<Value>;
}

#[derive(Default, Clone)]
pub(crate) struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub(crate) fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub(crate) fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name(), Arc::new(tool));
    }

    pub(crate) fn tool_names(&self) -> Vec<String> {
        self.tools.keys().map(|name| name.to_string()).collect()
    }

    pub(crate) fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                tool_type: "function".to_string(),
                function: ToolFunction {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters(),
                },
            })
            .collect()
    }

    /// Runs one call and renders the outcome as tool-result text.
    ///
    /// Failures are reported back to the model instead of aborting the run.
    pub(crate) async fn call(&self, name: &str, raw_args: &str) -> String {
        match self.try_call(name, raw_args).await {
            Ok(output) => output,
            Err(err) => {
                tracing::error!(tool = name, "tool call failed: {err:#}");
                format!("An error occurred while running the tool. Please try again. Error: {err}")
            }
        }
    }

    async fn try_call(&self, name: &str, raw_args: &str) -> anyhow::Result<String> {
        let Some(tool) = self.tools.get(name) else {
            anyhow::bail!("Tool {name} not found");
        };
        let args: Value = if raw_args.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(raw_args)
                .map_err(|err| anyhow::anyhow!("Invalid JSON input for tool {name}: {err}"))?
        };
        tracing::debug!(tool = name, args = %args, "invoking tool");
        let output = tool.invoke(args).await?;
        Ok(match output {
            Value::String(text) => text,
            other => serde_json::to_string(&other)?,
        })
    }
}

/// Reads a required string argument.
pub(crate) fn required_str(args: &Value, key: &str) -> anyhow::Result<String> {
    match args.get(key).and_then(Value::as_str).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => anyhow::bail!("missing required argument `{key}`"),
    }
}

/// Reads an optional string argument, treating blank and `null` as absent.
pub(crate) fn optional_str(args: &Value, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
