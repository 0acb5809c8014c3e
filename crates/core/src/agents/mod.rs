//! Agent abstraction and management.
//!
//! This module provides the `Agent` trait (Adapter Pattern), the adapters for
//! each language-model backend, and the `AgentManager` that a crew uses to
//! reach its agents.

pub mod adapters;
pub mod agent_type;
pub mod base;
pub mod cli_executor;
pub mod factory;
pub mod manager;

pub use adapters::MockAgent;
pub use agent_type::AgentType;
pub use base::{Agent, AgentError, AgentEvent, AgentEventStream, ExecutionContext};
pub use factory::AgentFactory;
pub use manager::AgentManager;
