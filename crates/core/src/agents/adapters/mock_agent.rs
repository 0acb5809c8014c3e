//! Offline backend answering from a script.
//!
//! Model names the factory does not recognise resolve here, so a freshly
//! scaffolded project can be kicked off without any API key.

use crate::agents::base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
use async_trait::async_trait;

/// Replays the same scripted answer on every task.
#[derive(Clone, Debug)]
pub struct MockAgent {
    available: bool,
    script: Vec<Result<AgentEvent, AgentError>>,
}

impl MockAgent {
    pub fn scripted(script: Vec<Result<AgentEvent, AgentError>>) -> Self {
        Self {
            available: true,
            script,
        }
    }

    /// The canned answer used when no real model is configured.
    pub fn success() -> Self {
        Self::responding("Mock response")
    }

    pub fn responding(text: impl Into<String>) -> Self {
        Self::scripted(vec![
            Ok(AgentEvent::Thought("drafting".to_string())),
            Ok(AgentEvent::MessageChunk(text.into())),
            Ok(AgentEvent::Completed),
        ])
    }

    /// Fails the availability probe, so a manager with a fallback skips it.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            script: Vec::new(),
        }
    }

    /// Breaks off mid-answer with an execution error.
    pub fn failing() -> Self {
        Self::scripted(vec![
            Ok(AgentEvent::MessageChunk("Roses are".to_string())),
            Err(AgentError::ExecutionError("Mock failure".to_string())),
        ])
    }
}

#[async_trait]
impl Agent for MockAgent {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn execute(&self, _context: &ExecutionContext) -> Result<AgentEventStream, AgentError> {
        if !self.available {
            return Err(AgentError::NotAvailable("offline mock switched off".to_string()));
        }
        Ok(Box::pin(tokio_stream::iter(self.script.clone())))
    }
}
