//! The unit of work a flow schedules.

use super::state::StateHandle;
use async_trait::async_trait;
use cf_protocol::events::FlowEvent;
use std::future::Future;
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// What a running step can reach: the shared state and the event channel.
pub struct StepContext<S> {
    flow_id: Uuid,
    step: String,
    state: StateHandle<S>,
    events_tx: Sender<FlowEvent>,
}

impl<S> Clone for StepContext<S> {
    fn clone(&self) -> Self {
        Self {
            flow_id: self.flow_id,
            step: self.step.clone(),
            state: self.state.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

impl<S> StepContext<S> {
    pub(crate) fn new(
        flow_id: Uuid,
        step: impl Into<String>,
        state: StateHandle<S>,
        events_tx: Sender<FlowEvent>,
    ) -> Self {
        Self {
            flow_id,
            step: step.into(),
            state,
            events_tx,
        }
    }

    pub fn state(&self) -> &StateHandle<S> {
        &self.state
    }

    pub fn step_name(&self) -> &str {
        &self.step
    }

    pub fn flow_id(&self) -> Uuid {
        self.flow_id
    }

    /// Send a progress line to whoever follows the run.
    pub async fn log(&self, content: impl Into<String>) {
        let _ = self
            .events_tx
            .send(FlowEvent::LogChunk {
                flow_id: self.flow_id,
                content: content.into(),
            })
            .await;
    }
}

/// A named piece of flow logic.
///
/// Steps read and write the flow state only through the context's
/// [`StateHandle`]. Returning an error stops the flow.
#[async_trait]
pub trait FlowStep<S>: Send + Sync {
    async fn run(&self, ctx: &StepContext<S>) -> anyhow::Result<()>;
}

/// Adapts an async closure into a [`FlowStep`].
///
/// ```
/// use cf_core::flow::{fn_step, FlowGraph, StepContext};
///
/// let graph: FlowGraph<u32> = FlowGraph::new("counter").start(
///     "bump",
///     fn_step(|ctx: StepContext<u32>| async move {
///         ctx.state().update(|n| *n += 1).await;
///         anyhow::Ok(())
///     }),
/// );
/// assert!(graph.validate().is_ok());
/// ```
pub fn fn_step<S, F, Fut>(f: F) -> FnStep<F>
where
    F: Fn(StepContext<S>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    FnStep(f)
}

pub struct FnStep<F>(F);

#[async_trait]
impl<S, F, Fut> FlowStep<S> for FnStep<F>
where
    S: Send + Sync + 'static,
    F: Fn(StepContext<S>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn run(&self, ctx: &StepContext<S>) -> anyhow::Result<()> {
        (self.0)(ctx.clone()).await
    }
}
