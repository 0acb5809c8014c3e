//! Flows: a typed state record and a DAG of steps that mutate it.
//!
//! Build a [`FlowGraph`] from start steps and listeners, then hand it to a
//! [`FlowRunner`]:
//!
//! ```
//! use cf_core::flow::{fn_step, FlowGraph, FlowRunner, StepContext, Trigger};
//! use cf_protocol::config_models::Dispatch;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = FlowGraph::new("double")
//!     .start("seed", fn_step(|ctx: StepContext<u32>| async move {
//!         ctx.state().update(|n| *n = 21).await;
//!         anyhow::Ok(())
//!     }))
//!     .listen("double", Trigger::after("seed"), fn_step(|ctx: StepContext<u32>| async move {
//!         ctx.state().update(|n| *n *= 2).await;
//!         anyhow::Ok(())
//!     }));
//!
//! let (tx, mut rx) = tokio::sync::mpsc::channel(64);
//! tokio::spawn(async move { while rx.recv().await.is_some() {} });
//!
//! let outcome = FlowRunner::new(graph, Dispatch::Sequential)?.run(0, tx).await?;
//! assert_eq!(outcome.state, 42);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod plot;
pub mod runner;
pub mod state;
pub mod step;

pub use error::FlowError;
pub use graph::{FlowGraph, StepNode, Trigger};
pub use runner::{FlowOutcome, FlowRunner};
pub use state::StateHandle;
pub use step::{fn_step, FlowStep, StepContext};
