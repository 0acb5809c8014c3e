//! Project settings from `crewflow.toml`.

use serde::Deserialize;
use serde::Serialize;

/// How a wave of independent flow steps is dispatched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// Run eligible steps one at a time, in registration order.
    #[default]
    Sequential,

    /// Run eligible steps concurrently and wait for all of them.
    Concurrent,
}

/// Represents the project-wide settings in `crewflow.toml`.
///
/// Every field has a default, so a missing file and an empty file are
/// equivalent.
///
/// # Example
///
/// ```toml
/// # crewflow.toml
/// output_dir = "output"
/// plot_name = "my_plot_flow"
/// dispatch = "concurrent"
/// default_llm = "gpt-4o-mini"
/// fallback_llm = "claude-sonnet-4"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Directory (relative to the project root) the flow writes its files to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Base name of the visualization file, without extension.
    #[serde(default = "default_plot_name")]
    pub plot_name: String,

    #[serde(default)]
    pub dispatch: Dispatch,

    /// Model used by agents that do not set `llm`.
    #[serde(default = "default_llm")]
    pub default_llm: String,

    /// Model tried when an agent's own backend is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_llm: Option<String>,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_plot_name() -> String {
    "my_plot_flow".to_string()
}

fn default_llm() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            plot_name: default_plot_name(),
            dispatch: Dispatch::default(),
            default_llm: default_llm(),
            fallback_llm: None,
        }
    }
}
