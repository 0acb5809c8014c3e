//! The crew runtime: sequential execution of tasks by agents.

use super::error::{CrewError, CrewResult};
use super::interpolate::{interpolate, placeholders};
use super::output::{CrewOutput, TaskOutput};
use super::prompt::{system_prompt, task_prompt};
use super::Inputs;
use crate::agents::{Agent, AgentEvent, AgentManager, ExecutionContext};
use crate::files::write_atomic;
use async_trait::async_trait;
use cf_protocol::config_models::GlobalConfig;
use cf_protocol::crew_models::CrewDefinition;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_stream::StreamExt;

/// Rewrites the inputs before any task runs.
pub type BeforeKickoffHook = Arc<dyn Fn(Inputs) -> Inputs + Send + Sync>;

/// Rewrites the output after the last task finished.
pub type AfterKickoffHook = Arc<dyn Fn(CrewOutput) -> CrewOutput + Send + Sync>;

/// Anything that can be kicked off with inputs and answers with a
/// [`CrewOutput`].
///
/// Flow steps depend on this trait rather than on [`Crew`] so tests can
/// substitute scripted crews.
#[async_trait]
pub trait Kickoff: Send + Sync {
    async fn kickoff(&self, inputs: Inputs) -> CrewResult<CrewOutput>;
}

/// A crew definition bound to live agents.
pub struct Crew {
    definition: CrewDefinition,
    manager: AgentManager,
    /// Agent key resolved for each task, in task order.
    task_agents: Vec<String>,
    base_dir: PathBuf,
    before_hooks: Vec<BeforeKickoffHook>,
    after_hooks: Vec<AfterKickoffHook>,
}

impl Crew {
    /// Build a crew from its definition.
    ///
    /// Agents are created with each spec's `llm`, or `global.default_llm`
    /// when unset. Every task is bound to its agent up front.
    pub fn from_definition(definition: CrewDefinition, global: &GlobalConfig) -> CrewResult<Self> {
        if definition.tasks.is_empty() {
            return Err(CrewError::NoTasks {
                crew: definition.name.clone(),
            });
        }

        let task_agents = definition
            .tasks
            .iter()
            .map(|task| resolve_agent(&definition, &task.key, task.spec.agent.as_deref()))
            .collect::<CrewResult<Vec<_>>>()?;

        let manager = AgentManager::from_specs(
            &definition.agents,
            &global.default_llm,
            global.fallback_llm.as_deref(),
        );

        Ok(Self {
            definition,
            manager,
            task_agents,
            base_dir: PathBuf::from("."),
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
        })
    }

    /// Directory that relative `output_file`s resolve against and that
    /// CLI-driven agents run in.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replace the agent registered under `key`.
    pub fn with_agent(mut self, key: &str, agent: Arc<dyn Agent>) -> Self {
        self.manager.register(key, agent);
        self
    }

    pub fn before_kickoff<F>(mut self, hook: F) -> Self
    where
        F: Fn(Inputs) -> Inputs + Send + Sync + 'static,
    {
        self.before_hooks.push(Arc::new(hook));
        self
    }

    pub fn after_kickoff<F>(mut self, hook: F) -> Self
    where
        F: Fn(CrewOutput) -> CrewOutput + Send + Sync + 'static,
    {
        self.after_hooks.push(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &CrewDefinition {
        &self.definition
    }

    /// Placeholder names the crew's agents and tasks expect, deduplicated.
    pub fn required_inputs(&self) -> Vec<String> {
        let texts = self
            .definition
            .agents
            .iter()
            .flat_map(|a| [&a.spec.role, &a.spec.goal, &a.spec.backstory])
            .chain(
                self.definition
                    .tasks
                    .iter()
                    .flat_map(|t| [&t.spec.description, &t.spec.expected_output]),
            );

        let mut names: Vec<String> = Vec::new();
        for name in texts.flat_map(|text| placeholders(text)) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn fill(&self, task: &str, template: &str, inputs: &Inputs) -> CrewResult<String> {
        interpolate(template, inputs).map_err(|name| CrewError::MissingInput {
            crew: self.definition.name.clone(),
            task: task.to_string(),
            name,
        })
    }

    async fn run_task(
        &self,
        index: usize,
        inputs: &Inputs,
        context: &[&str],
    ) -> CrewResult<TaskOutput> {
        let crew = &self.definition.name;
        let task = &self.definition.tasks.as_slice()[index];
        let agent_key = &self.task_agents[index];
        let agent = self
            .definition
            .agents
            .get(agent_key)
            .ok_or_else(|| CrewError::UnknownAgent {
                crew: crew.clone(),
                task: task.key.clone(),
                agent: agent_key.clone(),
            })?;

        let system = system_prompt(
            &self.fill(&task.key, &agent.role, inputs)?,
            &self.fill(&task.key, &agent.goal, inputs)?,
            &self.fill(&task.key, &agent.backstory, inputs)?,
        );
        let description = self.fill(&task.key, &task.spec.description, inputs)?;
        let expected_output = self.fill(&task.key, &task.spec.expected_output, inputs)?;
        let instruction = task_prompt(&description, &expected_output, context);

        tracing::info!(crew = %crew, task = %task.key, agent = %agent_key, "running task");

        let execution = ExecutionContext::new(instruction)
            .with_system_prompt(system)
            .with_working_dir(self.base_dir.to_string_lossy());

        let agent_error = |source| CrewError::Agent {
            crew: crew.clone(),
            task: task.key.clone(),
            source,
        };

        let mut stream = self
            .manager
            .execute(agent_key, &execution)
            .await
            .map_err(agent_error)?;

        let mut raw = String::new();
        while let Some(event) = stream.next().await {
            match event.map_err(agent_error)? {
                AgentEvent::MessageChunk(chunk) => {
                    if agent.verbose {
                        tracing::debug!(task = %task.key, %chunk, "agent output");
                    }
                    raw.push_str(&chunk);
                }
                AgentEvent::Thought(thought) if agent.verbose => {
                    tracing::debug!(task = %task.key, %thought, "agent thought");
                }
                AgentEvent::ToolCall(call) if agent.verbose => {
                    tracing::debug!(task = %task.key, %call, "agent tool call");
                }
                AgentEvent::Completed => break,
                _ => {}
            }
        }

        if raw.is_empty() {
            tracing::warn!(crew = %crew, task = %task.key, "agent returned an empty answer");
        }

        if let Some(output_file) = &task.spec.output_file {
            let path = self.base_dir.join(self.fill(&task.key, output_file, inputs)?);
            write_atomic(&path, &raw).map_err(|source| CrewError::OutputWrite {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "wrote task output file");
        }

        Ok(TaskOutput {
            name: task.key.clone(),
            agent: agent_key.clone(),
            description,
            raw,
        })
    }
}

#[async_trait]
impl Kickoff for Crew {
    async fn kickoff(&self, inputs: Inputs) -> CrewResult<CrewOutput> {
        let inputs = self
            .before_hooks
            .iter()
            .fold(inputs, |inputs, hook| hook(inputs));

        tracing::info!(crew = %self.definition.name, "crew kickoff");

        let mut tasks_output: Vec<TaskOutput> = Vec::with_capacity(self.task_agents.len());
        for index in 0..self.task_agents.len() {
            let output = {
                let context: Vec<&str> = tasks_output.iter().map(|t| t.raw.as_str()).collect();
                self.run_task(index, &inputs, &context).await?
            };
            tasks_output.push(output);
        }

        let raw = tasks_output
            .last()
            .map(|t| t.raw.clone())
            .unwrap_or_default();
        let output = CrewOutput { raw, tasks_output };

        Ok(self
            .after_hooks
            .iter()
            .fold(output, |output, hook| hook(output)))
    }
}

fn resolve_agent(definition: &CrewDefinition, task: &str, agent: Option<&str>) -> CrewResult<String> {
    match agent {
        Some(key) if definition.agents.get(key).is_some() => Ok(key.to_string()),
        Some(key) => Err(CrewError::UnknownAgent {
            crew: definition.name.clone(),
            task: task.to_string(),
            agent: key.to_string(),
        }),
        None => {
            let mut keys = definition.agents.keys();
            match (keys.next(), keys.next()) {
                (Some(only), None) => Ok(only.to_string()),
                _ => Err(CrewError::AmbiguousAgent {
                    crew: definition.name.clone(),
                    task: task.to_string(),
                    agents: definition.agents.len(),
                }),
            }
        }
    }
}
