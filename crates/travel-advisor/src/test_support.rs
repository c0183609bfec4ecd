use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::openai::{
    ChatChoice, ChatCompletion, ChatMessage, ChatModel, ChatRequest, FunctionCall, ToolCall,
};

/// Serves `app` on an ephemeral local port and returns its base url.
pub(crate) async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Replays canned replies in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<anyhow::Result<ChatMessage>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, message: ChatMessage) -> Self {
        self.replies.lock().unwrap().push_back(Ok(message));
        self
    }

    pub(crate) fn reply_text(self, content: &str) -> Self {
        self.reply(ChatMessage::assistant(content))
    }

    pub(crate) fn reply_tool_calls(self, calls: &[(&str, &str)]) -> Self {
        let tool_calls = calls
            .iter()
            .map(|(name, arguments)| ToolCall {
                id: format!("call_{}", uuid::Uuid::new_v4().simple()),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: arguments.to_string(),
                },
            })
            .collect();
        self.reply(ChatMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
        })
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: ChatRequest) -> anyhow::Result<ChatCompletion> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        let message = match next {
            Some(reply) => reply?,
            None => anyhow::bail!("scripted model has no reply left"),
        };
        Ok(ChatCompletion {
            id: "chatcmpl-test".to_string(),
            choices: vec![ChatChoice {
                message,
                finish_reason: None,
            }],
        })
    }
}
