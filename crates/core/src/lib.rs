//! # cf-core
//!
//! Runtime for crewflow projects.
//!
//! - [`config`]: loading `crewflow.toml` and the crew YAML files
//! - [`agents`]: the [`agents::Agent`] trait and its LLM backends
//! - [`crew`]: running a crew's tasks with its agents
//! - [`flow`]: step graphs with start and listen steps, their runner and plot
//! - [`poem`]: the poem flow built from the above
//! - [`init`]: scaffolding a new project

pub mod agents;
pub mod config;
pub mod crew;
pub mod files;
pub mod flow;
pub mod init;
pub mod poem;
