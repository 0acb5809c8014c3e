//! Error types for crew construction and kickoff.

use crate::agents::AgentError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("Crew '{crew}' has no tasks")]
    NoTasks { crew: String },

    /// A task names an agent that `agents.yaml` does not define.
    #[error("Task '{task}' in crew '{crew}' refers to unknown agent '{agent}'")]
    UnknownAgent {
        crew: String,
        task: String,
        agent: String,
    },

    /// A task omits `agent` while the crew has zero or several agents.
    #[error("Task '{task}' in crew '{crew}' does not name an agent and the crew has {agents} agents")]
    AmbiguousAgent {
        crew: String,
        task: String,
        agents: usize,
    },

    #[error("Task '{task}' in crew '{crew}' uses {{{name}}} but no input named '{name}' was given")]
    MissingInput {
        crew: String,
        task: String,
        name: String,
    },

    #[error("Agent for task '{task}' in crew '{crew}' failed: {source}")]
    Agent {
        crew: String,
        task: String,
        #[source]
        source: AgentError,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type CrewResult<T> = Result<T, CrewError>;
