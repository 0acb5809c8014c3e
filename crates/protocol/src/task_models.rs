//! Task definitions for `crews/<crew>/config/tasks.yaml`.

use serde::{Deserialize, Serialize};

/// A configured unit of work assigned to an agent within a crew.
///
/// # Example
///
/// ```yaml
/// image_describer_task:
///   description: >
///     Describe an image that captures the mood of this poem: {poem}
///   expected_output: >
///     A single paragraph describing the image.
///   agent: image_describer
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    /// Instructions for the agent. May contain `{placeholder}`s.
    pub description: String,

    /// What a complete answer looks like. May contain `{placeholder}`s.
    pub expected_output: String,

    /// Key of the agent in `agents.yaml` that performs this task.
    ///
    /// May be omitted when the crew has exactly one agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    /// Optional file the task's raw output is written to after it completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}
