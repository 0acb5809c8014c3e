//! Image generation adapter.
//!
//! Sends the task prompt to `POST {base_url}/images/generations` and answers
//! with the URL of the generated image, so the crew output is a text
//! reference to the image rather than its bytes.

use super::openai_http::{api_error_message, OpenAiEndpoint};
use crate::agents::base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use async_trait::async_trait;

/// Longest prompt the images endpoint accepts.
pub const MAX_PROMPT_CHARS: usize = 4000;

pub struct ImageAdapter {
    name: String,
    model: String,
    size: String,
    endpoint: OpenAiEndpoint,
}

impl ImageAdapter {
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
            size: "1024x1024".to_string(),
            endpoint,
        }
    }

    fn request_body(&self, context: &ExecutionContext) -> serde_json::Value {
        let prompt: String = context.instruction.chars().take(MAX_PROMPT_CHARS).collect();
        serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": self.size,
        })
    }
}

#[async_trait]
impl Agent for ImageAdapter {
    async fn check_availability(&self) -> bool {
        self.endpoint.has_key()
    }

    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        tracing::debug!(agent = %self.name, model = %self.model, "requesting image generation");

        let reply = self
            .endpoint
            .post_json("images/generations", self.request_body(context))
            .await?;

        Ok(Box::pin(tokio_stream::iter(image_events(&reply))))
    }
}

fn image_events(reply: &serde_json::Value) -> Vec<Result<AgentEvent, AgentError>> {
    if let Some(message) = api_error_message(reply) {
        return vec![Err(AgentError::ApiError(message))];
    }

    match reply.pointer("/data/0/url").and_then(|url| url.as_str()) {
        Some(url) => vec![
            Ok(AgentEvent::MessageChunk(url.to_string())),
            Ok(AgentEvent::Completed),
        ],
        None => vec![Err(AgentError::StreamParseError(
            "image reply has no data[0].url".to_string(),
        ))],
    }
}
