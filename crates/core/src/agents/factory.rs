//! Agent factory for creating agent instances from model names.

use crate::agents::adapters::{ClaudeAdapter, GeminiAdapter, ImageAdapter, MockAgent, OpenAiAdapter};
use crate::agents::agent_type::AgentType;
use crate::agents::base::Agent;
use std::sync::Arc;

/// Factory for creating agent instances based on configuration.
///
/// The adapter is chosen from the model name via
/// [`AgentType::from_model_name`]. Unknown models get a [`MockAgent`]; the
/// reserved names `test-failure-model` and `test-unavailable-model` produce
/// failing and unavailable mocks respectively.
pub struct AgentFactory;

impl AgentFactory {
    /// Create the agent registered under `name`, backed by `model`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cf_core::agents::AgentFactory;
    ///
    /// let agent = AgentFactory::create("poem_writer", "claude-sonnet-4");
    /// ```
    pub fn create(name: &str, model: &str) -> Arc<dyn Agent> {
        let agent_type = AgentType::from_model_name(model);
        tracing::debug!(agent = name, model, backend = agent_type.name(), "creating agent");

        match agent_type {
            AgentType::Claude => Arc::new(ClaudeAdapter::new(name, model)),
            AgentType::Gemini => Arc::new(GeminiAdapter::new(name, model)),
            AgentType::OpenAi => Arc::new(OpenAiAdapter::new(name, model)),
            AgentType::Image => Arc::new(ImageAdapter::new(name, model)),
            AgentType::Mock => match model {
                "test-failure-model" => Arc::new(MockAgent::failing()),
                "test-unavailable-model" => Arc::new(MockAgent::unavailable()),
                _ => Arc::new(MockAgent::success()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::base::ExecutionContext;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_factory_routes_cli_models_to_cli_backends() {
        // A mock would always report itself available.
        let claude = AgentFactory::create("a", "claude-sonnet-4");
        assert_eq!(claude.check_availability().await, which::which("claude").is_ok());

        let gemini = AgentFactory::create("b", "gemini-2.5-pro");
        assert_eq!(
            gemini.check_availability().await,
            which::which("gemini-cli").is_ok() && std::env::var("GEMINI_API_KEY").is_ok()
        );
    }

    #[tokio::test]
    async fn test_factory_create_mock() {
        let agent = AgentFactory::create("mock-agent", "test-model");
        assert!(agent.check_availability().await);

        let events: Vec<_> = agent
            .execute(&ExecutionContext::new("hi"))
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_factory_reserved_mock_models() {
        let unavailable = AgentFactory::create("x", "test-unavailable-model");
        assert!(!unavailable.check_availability().await);

        let failing = AgentFactory::create("y", "test-failure-model");
        let events: Vec<_> = failing
            .execute(&ExecutionContext::new("hi"))
            .await
            .unwrap()
            .collect()
            .await;
        assert!(events.iter().any(|e| e.is_err()));
    }

    #[test]
    fn test_factory_returns_arc() {
        let agent1 = AgentFactory::create("test", "claude-sonnet-4");
        let agent2 = agent1.clone();

        assert_eq!(Arc::strong_count(&agent1), 2);
        assert_eq!(Arc::strong_count(&agent2), 2);
    }
}
