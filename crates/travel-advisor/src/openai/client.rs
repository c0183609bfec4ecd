use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::http::join_base_path;

use super::types::{ChatCompletion, ChatRequest, OpenAiConfig};

/// Anything that can answer a chat completion request.
#[async_trait]
pub(crate) trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> anyhow::Result<ChatCompletion>;
}

pub(crate) struct OpenAiClient {
    config: OpenAiConfig,
    http_client: Client,
}

impl OpenAiClient {
    pub(crate) fn new(config: OpenAiConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> anyhow::Result<ChatCompletion> {
        let url = join_base_path(&self.config.base_url, &self.config.chat_path)?;
        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "openai request"
        );

        let started = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(
                    is_timeout = err.is_timeout(),
                    is_connect = err.is_connect(),
                    "openai request failed: {err}"
                );
                err
            })
            .context("openai request failed")?;

        let status = response.status();
        tracing::debug!(
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "openai response"
        );
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, "openai api error");
            anyhow::bail!("API error {status}: {text}");
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .context("failed to decode chat completion")?;
        Ok(completion)
    }
}
