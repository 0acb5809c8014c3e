//! Agent definitions for `crews/<crew>/config/agents.yaml`.
//!
//! Each top-level key of the file names one agent; the value describes the
//! role the language model is asked to play.

use serde::{Deserialize, Serialize};

/// A configured role consumed by a language-model backend.
///
/// # Example
///
/// ```yaml
/// poem_writer:
///   role: >
///     CrewAI Poem Writer
///   goal: >
///     Generate a funny, light heartedpoem about how CrewAI
///     is awesome with a sentence count of {sentence_count}
///   backstory: >
///     You're a creative poet with a talent for capturing the essence of any topic
///     in a beautiful and engaging way.
///   llm: gpt-4o-mini
/// ```
///
/// `role`, `goal` and `backstory` may contain `{placeholder}`s that are
/// filled from the kickoff inputs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    /// The role the agent plays (e.g. "Image Describer").
    pub role: String,

    /// What the agent is trying to achieve.
    pub goal: String,

    /// Background that shapes the agent's answers.
    pub backstory: String,

    /// Model name used to pick a backend. Falls back to the project's
    /// `default_llm` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,

    /// Emit per-chunk debug logs while the agent runs.
    #[serde(default)]
    pub verbose: bool,
}
