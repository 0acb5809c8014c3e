//! # cf-protocol
//!
//! Shared definitions for crewflow.
//!
//! This crate defines the data structures used for:
//! - Configuration parsing (`agents.yaml`, `tasks.yaml`, `crewflow.toml`)
//! - Flow run records
//! - Progress events sent from a running flow to its observer
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent definitions
//! - [`task_models`]: Task definitions
//! - [`crew_models`]: Crew definitions and the ordered YAML mapping type
//! - [`config_models`]: Project settings
//! - [`flow_models`]: Run and step records
//! - [`events`]: Flow progress events
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid and chrono
//! - Independent compilation: no dependencies on other crewflow crates

pub mod agent_models;
pub mod config_models;
pub mod crew_models;
pub mod events;
pub mod flow_models;
pub mod task_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use crew_models::*;
pub use events::*;
pub use flow_models::*;
pub use task_models::*;
