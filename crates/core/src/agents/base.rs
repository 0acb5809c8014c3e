//! The backend seam every LLM integration implements.

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Boxed stream of agent events returned by [`Agent::execute`].
pub type AgentEventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent, AgentError>> + Send>>;

/// Everything a backend needs to answer one task.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// The task prompt.
    pub instruction: String,

    /// The agent persona (role, backstory, goal) rendered for this kickoff.
    pub system_prompt: String,

    /// Working directory for CLI-driven backends.
    pub working_dir: String,
}

impl ExecutionContext {
    /// Context with an empty persona, running in the process's current
    /// directory.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            system_prompt: String::new(),
            working_dir: std::env::current_dir()
                .ok()
                .and_then(|p| p.to_str().map(|s| s.to_string()))
                .unwrap_or_else(|| ".".to_string()),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.working_dir = working_dir.into();
        self
    }
}

/// One item of an agent's answer. Only `MessageChunk`s make up the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    Thought(String),
    ToolCall(String),
    MessageChunk(String),
    Completed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Missing API key or CLI binary; the manager may fall back.
    #[error("LLM backend unavailable: {0}")]
    NotAvailable(String),
    #[error("LLM request rejected: {0}")]
    ApiError(String),
    #[error("Malformed LLM response: {0}")]
    StreamParseError(String),
    #[error("LLM backend failed: {0}")]
    ExecutionError(String),
}

/// An LLM backend able to answer one task at a time.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn check_availability(&self) -> bool;
    async fn execute(&self, context: &ExecutionContext) -> Result<AgentEventStream, AgentError>;
}
