//! Configuration models that aggregate all settings.

use crate::config::error::{ConfigError, ConfigResult};
use cf_protocol::config_models::GlobalConfig;
use cf_protocol::crew_models::CrewDefinition;
use std::path::PathBuf;

/// Everything loaded from a project directory.
///
/// # Example
///
/// ```rust,no_run
/// use cf_core::config::load_project;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let project = load_project(Path::new(".")).await?;
/// println!("Loaded {} crews", project.crews.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Directory the project was loaded from.
    pub root: PathBuf,

    /// Settings from `crewflow.toml`, or defaults.
    pub global: GlobalConfig,

    /// Crews sorted by name.
    pub crews: Vec<CrewDefinition>,
}

impl ProjectConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global: GlobalConfig::default(),
            crews: Vec::new(),
        }
    }

    /// Look up a crew by its directory name.
    pub fn crew(&self, name: &str) -> ConfigResult<&CrewDefinition> {
        self.crews
            .iter()
            .find(|crew| crew.name == name)
            .ok_or_else(|| ConfigError::UnknownCrew {
                path: self.root.join("crews"),
                name: name.to_string(),
            })
    }

    /// Directory flow outputs and the plot are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.global.output_dir)
    }
}
