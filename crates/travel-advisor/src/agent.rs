use futures_util::future::join_all;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::RunError;
use crate::guardrails::{InputGuardrail, OutputGuardrail};
use crate::openai::{ChatMessage, ChatModel, ChatRequest, ToolCall};
use crate::tools::ToolRegistry;

#[derive(Debug, Clone)]
pub(crate) struct AgentDefinition {
    pub(crate) name: String,
    pub(crate) instructions: String,
    pub(crate) model: String,
}

#[derive(Debug, Clone)]
pub(crate) struct RunResult {
    pub(crate) run_id: String,
    pub(crate) final_output: String,
    pub(crate) turns: usize,
}

/// Drives one agent run: input guardrail, tool loop, output guardrail.
pub(crate) struct Runner {
    model: Arc<dyn ChatModel>,
    agent: AgentDefinition,
    tools: ToolRegistry,
    input_guardrail: InputGuardrail,
    output_guardrail: OutputGuardrail,
    max_turns: usize,
}

impl Runner {
    pub(crate) fn new(
        model: Arc<dyn ChatModel>,
        agent: AgentDefinition,
        tools: ToolRegistry,
        input_guardrail: InputGuardrail,
        output_guardrail: OutputGuardrail,
        max_turns: usize,
    ) -> Self {
        Self {
            model,
            agent,
            tools,
            input_guardrail,
            output_guardrail,
            max_turns,
        }
    }

    pub(crate) async fn run(&self, input: &str) -> Result<RunResult, RunError> {
        let run_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("agent_run", run_id = %run_id, agent = %self.agent.name);
        self.run_guarded(input, run_id).instrument(span).await
    }

    async fn run_guarded(&self, input: &str, run_id: String) -> Result<RunResult, RunError> {
        tracing::info!(tools = ?self.tools.tool_names(), "starting run");

        let verdict = self.input_guardrail.check(input).await?;
        if verdict.tripwire_triggered {
            tracing::warn!("input rejected: {}", verdict.output.reason);
            return Err(RunError::InputRejected(verdict.output));
        }

        let (final_output, turns) = self.tool_loop(input).await?;

        let verdict = self.output_guardrail.check(&final_output).await?;
        if verdict.tripwire_triggered {
            tracing::warn!("output rejected: {}", verdict.output.explanation);
            return Err(RunError::OutputRejected(verdict.output));
        }

        tracing::info!(turns, output_len = final_output.len(), "run completed");
        Ok(RunResult {
            run_id,
            final_output,
            turns,
        })
    }

    async fn tool_loop(&self, input: &str) -> anyhow::Result<(String, usize)> {
        let mut messages = vec![
            ChatMessage::system(self.agent.instructions.as_str()),
            ChatMessage::user(input),
        ];
        let definitions = self.tools.definitions();

        for turn in 1..=self.max_turns {
            let request = ChatRequest::new(&self.agent.model, messages.clone())
                .with_tools(definitions.clone());
            let completion = self.model.complete(request).await?;
            let finish_reason = completion
                .choices
                .first()
                .and_then(|choice| choice.finish_reason.clone())
                .unwrap_or_default();
            let message = completion.first_message()?;
            tracing::debug!(turn, finish_reason = %finish_reason, "model turn");

            if !message.has_tool_calls() {
                return Ok((message.text().to_string(), turn));
            }
            let calls = message.tool_calls.clone().unwrap_or_default();
            messages.push(message);
            let results = self.run_tool_calls(&calls).await;
            messages.extend(
                calls
                    .iter()
                    .zip(results)
                    .map(|(call, output)| ChatMessage::tool(call.id.clone(), output)),
            );
        }

        anyhow::bail!("Max turns ({}) exceeded", self.max_turns)
    }

    async fn run_tool_calls(&self, calls: &[ToolCall]) -> Vec<String> {
        let futures = calls.iter().map(|call| {
            tracing::info!(tool = %call.function.name, call_id = %call.id, "tool call");
            self.tools.call(&call.function.name, &call.function.arguments)
        });
        join_all(futures).await
    }
}
