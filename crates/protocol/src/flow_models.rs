//! Runtime records of a flow execution.
//!
//! A [`FlowRun`] is created when a flow starts and updated as each step
//! runs. It is returned to the caller when the run ends; it is never
//! persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a whole flow run.
///
/// Pending -> Running -> Completed, or Running -> Failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Lifecycle status of a single step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    /// Not yet eligible, or eligible but not dispatched.
    Pending,
    Running,
    Completed,
    Failed,
}

/// What happened to one step during a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Display form of the step's error, if it failed.
    pub error: Option<String>,
}

impl StepRecord {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Pending,
            started_at: None,
            finished_at: None,
            error: None,
        }
    }
}

/// The record of one flow execution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlowRun {
    /// Unique identifier for this run.
    pub id: Uuid,

    pub flow_name: String,

    pub status: FlowStatus,

    /// One record per declared step, in registration order.
    pub steps: Vec<StepRecord>,

    /// Step names in the order they finished.
    pub completion_order: Vec<String>,

    pub started_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl FlowRun {
    /// Create a pending run with a fresh id and one pending record per step.
    pub fn new<'a>(flow_name: impl Into<String>, steps: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            flow_name: flow_name.into(),
            status: FlowStatus::Pending,
            steps: steps.into_iter().map(StepRecord::pending).collect(),
            completion_order: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn step_mut(&mut self, name: &str) -> Option<&mut StepRecord> {
        self.steps.iter_mut().find(|s| s.name == name)
    }
}
