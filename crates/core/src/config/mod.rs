//! Configuration loading and management.
//!
//! A project is a directory holding an optional `crewflow.toml` and one
//! sub-directory per crew under `crews/`, each with `config/agents.yaml` and
//! `config/tasks.yaml`.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_project;
pub use models::ProjectConfig;
