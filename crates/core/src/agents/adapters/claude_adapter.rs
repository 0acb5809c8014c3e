//! Claude adapter implementation using the Claude CLI in print mode.

use crate::agents::base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use crate::agents::cli_executor::{CliExecutor, CliInvocation};
use async_trait::async_trait;
use serde::Deserialize;
use tokio_stream::StreamExt;

const CLAUDE_BIN: &str = "claude";

/// Claude adapter for answering tasks with the `claude` CLI.
///
/// Runs `claude -p <prompt> --output-format stream-json` and converts the
/// JSON Lines it prints into [`AgentEvent`]s.
pub struct ClaudeAdapter {
    name: String,
    model: String,
}

impl ClaudeAdapter {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }

    fn invocation(&self, context: &ExecutionContext) -> CliInvocation {
        let mut invocation = CliInvocation::new(CLAUDE_BIN, &context.working_dir)
            .arg("-p")
            .arg(&context.instruction)
            .opt("--output-format", "stream-json")
            .arg("--verbose")
            .opt("--model", &self.model);

        if !context.system_prompt.is_empty() {
            invocation = invocation.opt("--append-system-prompt", &context.system_prompt);
        }

        invocation
    }
}

#[async_trait]
impl Agent for ClaudeAdapter {
    async fn check_availability(&self) -> bool {
        which::which(CLAUDE_BIN).is_ok()
    }

    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        tracing::debug!(agent = %self.name, model = %self.model, "executing via claude CLI");
        let mut lines = CliExecutor::execute(self.invocation(context));

        let stream = async_stream::stream! {
            while let Some(line) = lines.next().await {
                match line {
                    Ok(value) => {
                        for event in convert_claude_line(value) {
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

/// Claude CLI stream-json message types.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClaudeMessage {
    Assistant {
        message: AssistantMessage,
    },
    Result {
        #[serde(default)]
        is_error: bool,
        #[serde(default)]
        result: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
    },
    ToolUse {
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

fn convert_claude_line(value: serde_json::Value) -> Vec<Result<AgentEvent, AgentError>> {
    let message = match serde_json::from_value::<ClaudeMessage>(value) {
        Ok(message) => message,
        Err(e) => {
            return vec![Err(AgentError::StreamParseError(format!(
                "Unexpected claude message: {e}"
            )))]
        }
    };

    match message {
        ClaudeMessage::Assistant { message } => message
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } if !text.is_empty() => {
                    Some(Ok(AgentEvent::MessageChunk(text)))
                }
                ContentBlock::Thinking { thinking } => Some(Ok(AgentEvent::Thought(thinking))),
                ContentBlock::ToolUse { name, input } => Some(Ok(AgentEvent::ToolCall(
                    serde_json::json!({ "name": name, "input": input }).to_string(),
                ))),
                _ => None,
            })
            .collect(),
        ClaudeMessage::Result {
            is_error: true,
            result,
        } => vec![Err(AgentError::ApiError(
            result.unwrap_or_else(|| "claude reported an error".to_string()),
        ))],
        ClaudeMessage::Result { .. } => vec![Ok(AgentEvent::Completed)],
        ClaudeMessage::Other => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocation_arguments() {
        let adapter = ClaudeAdapter::new("poem_writer", "claude-sonnet-4");
        let context = ExecutionContext::new("Write a poem")
            .with_system_prompt("You are a poet.")
            .with_working_dir("/tmp");

        let invocation = adapter.invocation(&context);

        assert_eq!(invocation.program, "claude");
        assert_eq!(invocation.working_dir, "/tmp");
        assert_eq!(
            invocation.args,
            vec![
                "-p",
                "Write a poem",
                "--output-format",
                "stream-json",
                "--verbose",
                "--model",
                "claude-sonnet-4",
                "--append-system-prompt",
                "You are a poet.",
            ]
        );
    }

    #[test]
    fn test_invocation_without_system_prompt() {
        let adapter = ClaudeAdapter::new("poem_writer", "claude-sonnet-4");
        let invocation = adapter.invocation(&ExecutionContext::new("hi"));
        assert!(!invocation.args.iter().any(|a| a == "--append-system-prompt"));
    }

    #[test]
    fn test_convert_assistant_text_blocks() {
        let events = convert_claude_line(json!({
            "type": "assistant",
            "message": {
                "content": [
                    {"type": "text", "text": "Roses "},
                    {"type": "tool_use", "id": "t1", "name": "Read", "input": {"path": "a"}},
                    {"type": "text", "text": "are red"}
                ]
            }
        }));

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Ok(AgentEvent::MessageChunk("Roses ".to_string())));
        assert!(matches!(&events[1], Ok(AgentEvent::ToolCall(call)) if call.contains("Read")));
        assert_eq!(events[2], Ok(AgentEvent::MessageChunk("are red".to_string())));
    }

    #[test]
    fn test_convert_result_and_system() {
        assert!(convert_claude_line(json!({"type": "system", "session_id": "s"})).is_empty());
        assert_eq!(
            convert_claude_line(json!({"type": "result", "is_error": false, "result": "x"})),
            vec![Ok(AgentEvent::Completed)]
        );
        assert_eq!(
            convert_claude_line(json!({"type": "result", "is_error": true, "result": "quota"})),
            vec![Err(AgentError::ApiError("quota".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_check_availability_does_not_panic() {
        let adapter = ClaudeAdapter::new("test", "claude-sonnet-4");
        let _ = adapter.check_availability().await;
    }
}
