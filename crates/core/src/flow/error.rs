//! Errors raised while validating or running a flow.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    /// The step graph cannot be run.
    #[error("Invalid flow '{flow}': {reason}")]
    InvalidGraph { flow: String, reason: String },

    /// A step returned an error. Later waves were not started.
    #[error("Step '{step}' failed: {source:#}")]
    StepFailed {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Step '{step}' panicked: {message}")]
    StepPanicked { step: String, message: String },
}

impl FlowError {
    /// Name of the step that stopped the run, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::InvalidGraph { .. } => None,
            Self::StepFailed { step, .. } | Self::StepPanicked { step, .. } => Some(step),
        }
    }
}
