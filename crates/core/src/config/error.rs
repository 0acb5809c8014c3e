//! Errors raised while loading a project.
//!
//! Every variant carries the path it concerns so a report points straight at
//! the offending file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid crewflow.toml: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Also raised for duplicate agent or task ids.
    #[error("{path} is not a valid crew YAML file: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Cannot list crews in {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// The project layout is incomplete, e.g. a crew without `tasks.yaml`.
    #[error("Invalid crew directory {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    /// A crew was requested that the project does not define.
    #[error("No crew named '{name}' under {path}")]
    UnknownCrew { path: PathBuf, name: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
