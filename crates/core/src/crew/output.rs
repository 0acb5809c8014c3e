//! Results of a crew kickoff.

use serde::Serialize;
use std::fmt;

/// What one task produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutput {
    /// Task key from `tasks.yaml`.
    pub name: String,
    /// Agent key that answered it.
    pub agent: String,
    /// The interpolated task description.
    pub description: String,
    /// The agent's complete answer.
    pub raw: String,
}

/// The result of [`Kickoff::kickoff`](super::Kickoff::kickoff).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CrewOutput {
    /// Answer of the last task.
    pub raw: String,
    /// Every task's output in execution order.
    pub tasks_output: Vec<TaskOutput>,
}

impl CrewOutput {
    /// An output with no per-task detail.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            tasks_output: Vec::new(),
        }
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
