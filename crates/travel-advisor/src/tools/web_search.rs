use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{required_str, Tool};
use crate::openai::{ChatMessage, ChatModel, ChatRequest};

/// Web search backed by a search-enabled chat model.
pub(crate) struct WebSearch {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl WebSearch {
    pub(crate) fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }
}

#[async_trait]
impl Tool for WebSearch {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web for up-to-date information such as local events, news, \
         transport disruptions and travel advisories. Returns a cited summary."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query."}
            },
            "required": ["query"],
            "additionalProperties": false,
        })
    }

    async fn invoke(&self, args: Value) -> anyhow::Result<Value> {
        let query = required_str(&args, "query")?;
        tracing::info!("Searching the web: {query}");
        let request = ChatRequest::new(&self.model_name, vec![ChatMessage::user(query)])
            .with_web_search();
        let message = self.model.complete(request).await?.first_message()?;
        let text = message.text().trim();
        if text.is_empty() {
            anyhow::bail!("web search returned no content");
        }
        Ok(Value::String(text.to_string()))
    }
}
