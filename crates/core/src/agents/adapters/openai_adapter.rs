//! OpenAI chat completions adapter.

use super::openai_http::{api_error_message, OpenAiEndpoint};
use crate::agents::base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use async_trait::async_trait;

/// Answers tasks through `POST {base_url}/chat/completions`.
pub struct OpenAiAdapter {
    name: String,
    model: String,
    endpoint: OpenAiEndpoint,
}

impl OpenAiAdapter {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(name, model, OpenAiEndpoint::from_env())
    }

    pub fn with_endpoint(
        name: impl Into<String>,
        model: impl Into<String>,
        endpoint: OpenAiEndpoint,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            endpoint,
        }
    }

    fn request_body(&self, context: &ExecutionContext) -> serde_json::Value {
        let mut messages = Vec::with_capacity(2);
        if !context.system_prompt.is_empty() {
            messages.push(serde_json::json!({
                "role": "system",
                "content": context.system_prompt,
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": context.instruction,
        }));

        serde_json::json!({
            "model": self.model,
            "messages": messages,
        })
    }
}

#[async_trait]
impl Agent for OpenAiAdapter {
    async fn check_availability(&self) -> bool {
        self.endpoint.has_key()
    }

    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        tracing::debug!(agent = %self.name, model = %self.model, "requesting chat completion");

        let reply = self
            .endpoint
            .post_json("chat/completions", self.request_body(context))
            .await?;

        let events = completion_events(&reply);
        Ok(Box::pin(tokio_stream::iter(events)))
    }
}

fn completion_events(reply: &serde_json::Value) -> Vec<Result<AgentEvent, AgentError>> {
    if let Some(message) = api_error_message(reply) {
        return vec![Err(AgentError::ApiError(message))];
    }

    let content = reply
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.pointer("/message/content"))
        .and_then(|content| content.as_str());

    match content {
        Some(text) => vec![
            Ok(AgentEvent::MessageChunk(text.to_string())),
            Ok(AgentEvent::Completed),
        ],
        None => vec![Err(AgentError::StreamParseError(
            "chat completion reply has no message content".to_string(),
        ))],
    }
}
