//! Shared helpers for the integration tests.
//!
//! - project fixtures on disk and in memory
//! - scripted crews and recording agents
//! - assertions over flow events and run records

pub mod assertions;
pub mod fixtures;
pub mod mock_crews;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_crews::*;
