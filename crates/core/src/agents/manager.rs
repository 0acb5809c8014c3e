//! Per-crew registry of live agents, keyed by their `agents.yaml` id.

use crate::agents::base::{Agent, AgentError, AgentEventStream, ExecutionContext};
use crate::agents::factory::AgentFactory;
use cf_protocol::{AgentSpec, NamedList};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry key of the agent built from `fallback_llm`.
pub const FALLBACK_AGENT: &str = "__fallback__";

#[derive(Default)]
pub struct AgentManager {
    agents: HashMap<String, Arc<dyn Agent>>,
    fallback_agent_name: Option<String>,
}

impl AgentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an agent for every spec.
    ///
    /// Each agent uses its own `llm`, or `default_llm` when unset. When
    /// `fallback_llm` is given an extra agent is registered under
    /// [`FALLBACK_AGENT`] and used whenever a requested agent is unavailable.
    pub fn from_specs(
        specs: &NamedList<AgentSpec>,
        default_llm: &str,
        fallback_llm: Option<&str>,
    ) -> Self {
        let mut manager = Self::new();

        for named in specs {
            let model = named.spec.llm.as_deref().unwrap_or(default_llm);
            manager.register(named.key.clone(), AgentFactory::create(&named.key, model));
        }

        if let Some(model) = fallback_llm {
            manager.register(FALLBACK_AGENT, AgentFactory::create(FALLBACK_AGENT, model));
            manager = manager.with_fallback(FALLBACK_AGENT);
        }

        manager
    }

    /// Replaces any agent already under `name`.
    pub fn register(&mut self, name: impl Into<String>, agent: Arc<dyn Agent>) {
        self.agents.insert(name.into(), agent);
    }

    pub fn with_fallback(mut self, agent_name: impl Into<String>) -> Self {
        self.fallback_agent_name = Some(agent_name.into());
        self
    }

    pub fn get_agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(name).cloned()
    }

    /// Run `context` on the agent under `agent_name`, switching to the
    /// fallback agent when the requested one fails its availability probe.
    pub async fn execute(
        &self,
        agent_name: &str,
        context: &ExecutionContext,
    ) -> Result<AgentEventStream, AgentError> {
        let agent = self.select(agent_name).await?;
        agent.execute(context).await
    }

    async fn select(&self, agent_name: &str) -> Result<Arc<dyn Agent>, AgentError> {
        let agent = self.get_agent(agent_name).ok_or_else(|| {
            AgentError::NotAvailable(format!("no agent registered as '{agent_name}'"))
        })?;
        if agent.check_availability().await {
            return Ok(agent);
        }

        let fallback = self
            .fallback_agent_name
            .as_deref()
            .filter(|name| *name != agent_name)
            .and_then(|name| self.get_agent(name).map(|agent| (name, agent)));
        if let Some((fallback_name, fallback)) = fallback {
            if fallback.check_availability().await {
                tracing::warn!(
                    agent = agent_name,
                    fallback = fallback_name,
                    "agent unavailable, using fallback"
                );
                return Ok(fallback);
            }
        }

        Err(AgentError::NotAvailable(format!(
            "'{agent_name}' is unreachable and no fallback model answered"
        )))
    }

    /// Registered keys in sorted order.
    pub fn list_agents(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }
}
