use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use travel_types::{InputScanResult, OutputScanResult};

use crate::openai::{ChatMessage, ChatModel, ChatRequest};
use crate::prompts::{
    INPUT_SCANNER_INSTRUCTIONS, INPUT_SCANNER_NAME, OUTPUT_CHECKER_INSTRUCTIONS,
    OUTPUT_CHECKER_NAME,
};

/// A classifier result plus whether it should stop the run.
#[derive(Debug, Clone)]
pub(crate) struct GuardrailVerdict<T> {
    pub(crate) output: T,
    pub(crate) tripwire_triggered: bool,
}

struct Classifier {
    model: Arc<dyn ChatModel>,
    model_name: String,
    name: &'static str,
    instructions: &'static str,
    schema_name: &'static str,
    schema: Value,
}

impl Classifier {
    async fn classify<T: DeserializeOwned>(&self, text: &str) -> anyhow::Result<T> {
        let request = ChatRequest::new(
            &self.model_name,
            vec![
                ChatMessage::system(self.instructions),
                ChatMessage::user(text),
            ],
        )
        .with_json_schema(self.schema_name, self.schema.clone());
        let message = self
            .model
            .complete(request)
            .await
            .with_context(|| format!("{} request failed", self.name))?
            .first_message()?;
        serde_json::from_str(message.text().trim())
            .with_context(|| format!("{} returned malformed output", self.name))
    }
}

pub(crate) struct InputGuardrail {
    classifier: Classifier,
}

impl InputGuardrail {
    pub(crate) fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            classifier: Classifier {
                model,
                model_name: model_name.into(),
                name: INPUT_SCANNER_NAME,
                instructions: INPUT_SCANNER_INSTRUCTIONS,
                schema_name: "input_scan_result",
                schema: json!({
                    "type": "object",
                    "properties": {
                        "is_off_topic": {"type": "boolean"},
                        "reason": {"type": "string"}
                    },
                    "required": ["is_off_topic", "reason"],
                    "additionalProperties": false,
                }),
            },
        }
    }

    pub(crate) async fn check(
        &self,
        input: &str,
    ) -> anyhow::Result<GuardrailVerdict<InputScanResult>> {
        let output: InputScanResult = self.classifier.classify(input).await?;
        tracing::info!(
            guardrail = INPUT_SCANNER_NAME,
            off_topic = output.is_off_topic,
            "input scan: {}",
            output.reason
        );
        Ok(GuardrailVerdict {
            tripwire_triggered: output.is_off_topic,
            output,
        })
    }
}

pub(crate) struct OutputGuardrail {
    classifier: Classifier,
}

impl OutputGuardrail {
    pub(crate) fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self {
            classifier: Classifier {
                model,
                model_name: model_name.into(),
                name: OUTPUT_CHECKER_NAME,
                instructions: OUTPUT_CHECKER_INSTRUCTIONS,
                schema_name: "output_scan_result",
                schema: json!({
                    "type": "object",
                    "properties": {
                        "contains_profanity": {"type": "boolean"},
                        "explanation": {"type": "string"}
                    },
                    "required": ["contains_profanity", "explanation"],
                    "additionalProperties": false,
                }),
            },
        }
    }

    pub(crate) async fn check(
        &self,
        output: &str,
    ) -> anyhow::Result<GuardrailVerdict<OutputScanResult>> {
        let result: OutputScanResult = self.classifier.classify(output).await?;
        tracing::info!(
            guardrail = OUTPUT_CHECKER_NAME,
            profanity = result.contains_profanity,
            "output scan: {}",
            result.explanation
        );
        Ok(GuardrailVerdict {
            tripwire_triggered: result.contains_profanity,
            output: result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedModel;

    #[tokio::test]
    async fn off_topic_input_trips() {
        let model = Arc::new(
            ScriptedModel::new().reply_text(r#"{"is_off_topic": true, "reason": "homework"}"#),
        );
        let guardrail = InputGuardrail::new(model.clone(), "gpt-4o-mini");
        let verdict = guardrail.check("solve my calculus homework").await.unwrap();
        assert!(verdict.tripwire_triggered);
        assert_eq!(verdict.output.reason, "homework");

        let request = &model.requests()[0];
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].text(), INPUT_SCANNER_INSTRUCTIONS);
        let format = request.response_format.as_ref().unwrap();
        assert_eq!(format["json_schema"]["name"], "input_scan_result");
    }

    #[tokio::test]
    async fn clean_output_passes() {
        let model = Arc::new(
            ScriptedModel::new()
                .reply_text(r#"{"contains_profanity": false, "explanation": "friendly"}"#),
        );
        let verdict = OutputGuardrail::new(model, "gpt-4o-mini")
            .check("# Paris\nEnjoy the Louvre!")
            .await
            .unwrap();
        assert!(!verdict.tripwire_triggered);
    }

    #[tokio::test]
    async fn malformed_verdict_is_an_error_not_a_trip() {
        let model = Arc::new(ScriptedModel::new().reply_text("I think it's fine"));
        let err = OutputGuardrail::new(model, "gpt-4o-mini")
            .check("text")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Output Tone Checker"));
    }
}
