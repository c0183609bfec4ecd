mod client;
mod types;

pub(crate) use client::{ChatModel, OpenAiClient};
pub(crate) use types::{
    ChatMessage, ChatRequest, OpenAiConfig, ToolCall, ToolDefinition, ToolFunction,
};
#[cfg(test)]
pub(crate) use types::{ChatChoice, ChatCompletion, FunctionCall};
