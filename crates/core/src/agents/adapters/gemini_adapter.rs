//! Gemini adapter implementation using JSON-RPC via stdio.
//!
//! One `generate` request is written to `gemini-cli`'s stdin; each response
//! line is a JSON-RPC response whose result carries the generated text.

use crate::agents::base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use crate::agents::cli_executor::{CliExecutor, CliInvocation};
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio_stream::StreamExt;

const GEMINI_BIN: &str = "gemini-cli";

pub struct GeminiAdapter {
    name: String,
    model: String,
}

impl GeminiAdapter {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }

    fn request(&self, context: &ExecutionContext) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: "generate".to_string(),
            params: GenerateParams {
                model: self.model.clone(),
                system: context.system_prompt.clone(),
                prompt: context.instruction.clone(),
            },
        }
    }
}

#[async_trait]
impl Agent for GeminiAdapter {
    async fn check_availability(&self) -> bool {
        which::which(GEMINI_BIN).is_ok() && std::env::var("GEMINI_API_KEY").is_ok()
    }

    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        tracing::debug!(agent = %self.name, model = %self.model, "executing via gemini-cli");

        let request = serde_json::to_string(&self.request(context)).map_err(|e| {
            AgentError::ExecutionError(format!("cannot encode the generate request: {e}"))
        })?;

        let mut lines =
            CliExecutor::execute(CliInvocation::new(GEMINI_BIN, &context.working_dir).input(request));

        let stream = async_stream::stream! {
            while let Some(line) = lines.next().await {
                match line.and_then(parse_response) {
                    Ok(response) => {
                        for event in convert_gemini_response(response) {
                            yield event;
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: u32,
    method: String,
    params: GenerateParams,
}

#[derive(Debug, Serialize)]
struct GenerateParams {
    model: String,
    system: String,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

fn parse_response(value: serde_json::Value) -> Result<JsonRpcResponse, AgentError> {
    serde_json::from_value(value).map_err(|e| {
        AgentError::StreamParseError(format!("unexpected gemini-cli reply: {e}"))
    })
}

/// Convert a response into message chunks followed by `Completed`.
///
/// Text is read from `result.text`, `result.parts[].text` or
/// `result.content`, whichever is present.
fn convert_gemini_response(response: JsonRpcResponse) -> Vec<Result<AgentEvent, AgentError>> {
    if let Some(error) = response.error {
        return vec![Err(AgentError::ApiError(format!(
            "Gemini API error (code {}): {}",
            error.code, error.message
        )))];
    }

    let mut events = Vec::new();
    if let Some(result) = response.result {
        if let Some(text) = result.get("text").and_then(|t| t.as_str()) {
            events.push(Ok(AgentEvent::MessageChunk(text.to_string())));
        } else if let Some(parts) = result.get("parts").and_then(|p| p.as_array()) {
            events.extend(
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                    .map(|text| Ok(AgentEvent::MessageChunk(text.to_string()))),
            );
        } else if let Some(content) = result.get("content").and_then(|c| c.as_str()) {
            events.push(Ok(AgentEvent::MessageChunk(content.to_string())));
        }
    }
    events.push(Ok(AgentEvent::Completed));
    events
}
