//! Crews: configured agents and tasks executed together.
//!
//! A [`Crew`] runs its tasks in declaration order. Each task's text is
//! interpolated from the kickoff [`Inputs`], rendered into a prompt, answered
//! by the task's agent and, when the task names an `output_file`, written to
//! disk. The last task's answer becomes the crew's output.

pub mod error;
pub mod interpolate;
pub mod kickoff;
pub mod output;
pub mod prompt;

pub use error::{CrewError, CrewResult};
pub use interpolate::interpolate;
pub use kickoff::{AfterKickoffHook, BeforeKickoffHook, Crew, Kickoff};
pub use output::{CrewOutput, TaskOutput};

use std::collections::BTreeMap;

/// Named values available to `{placeholder}`s during a kickoff.
pub type Inputs = BTreeMap<String, serde_json::Value>;
