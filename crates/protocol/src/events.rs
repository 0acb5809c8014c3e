//! Events emitted while a flow runs.
//!
//! The runner sends a [`FlowEvent`] over a channel for every state change so
//! a front end (the CLI, a test) can follow progress without polling.
//!
//! Serialized as a tagged enum:
//! ```json
//! {
//!   "type": "stepCompleted",
//!   "payload": {
//!     "flow_id": "uuid-here",
//!     "step": "generate_poem"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum FlowEvent {
    /// A flow run has begun.
    FlowStarted { flow_id: Uuid, flow_name: String },

    /// A step was dispatched.
    StepStarted { flow_id: Uuid, step: String },

    /// A step finished without error.
    StepCompleted { flow_id: Uuid, step: String },

    /// A step returned an error. The run stops after the current wave.
    StepFailed {
        flow_id: Uuid,
        step: String,
        error: String,
    },

    /// Free-form progress text from a step.
    LogChunk { flow_id: Uuid, content: String },

    /// Every step ran.
    FlowCompleted { flow_id: Uuid },

    /// The run was aborted by a step failure.
    FlowFailed { flow_id: Uuid, error: String },
}

impl FlowEvent {
    /// The run this event belongs to.
    pub fn flow_id(&self) -> Uuid {
        match self {
            Self::FlowStarted { flow_id, .. }
            | Self::StepStarted { flow_id, .. }
            | Self::StepCompleted { flow_id, .. }
            | Self::StepFailed { flow_id, .. }
            | Self::LogChunk { flow_id, .. }
            | Self::FlowCompleted { flow_id }
            | Self::FlowFailed { flow_id, .. } => *flow_id,
        }
    }

    /// Whether no further events follow for this run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FlowCompleted { .. } | Self::FlowFailed { .. })
    }
}
