//! Flow execution engine.
//!
//! The runner executes a validated [`FlowGraph`] in waves. A wave is every
//! step that has not run yet and whose trigger is satisfied by the steps
//! completed so far. Each step runs exactly once; the run ends when no step
//! is left, or at the first failure.

use super::error::FlowError;
use super::graph::{FlowGraph, StepNode};
use super::state::StateHandle;
use super::step::StepContext;
use cf_protocol::config_models::Dispatch;
use cf_protocol::events::FlowEvent;
use cf_protocol::flow_models::{FlowRun, FlowStatus, StepStatus};
use chrono::Utc;
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;

/// The final state of a successful run together with its record.
#[derive(Debug, Clone)]
pub struct FlowOutcome<S> {
    pub state: S,
    pub run: FlowRun,
}

pub struct FlowRunner<S> {
    graph: FlowGraph<S>,
    dispatch: Dispatch,
}

impl<S> FlowRunner<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Validate `graph` and wrap it in a runner.
    pub fn new(graph: FlowGraph<S>, dispatch: Dispatch) -> Result<Self, FlowError> {
        graph.validate()?;
        Ok(Self { graph, dispatch })
    }

    pub fn graph(&self) -> &FlowGraph<S> {
        &self.graph
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }

    /// Run every step once, starting from `initial_state`.
    ///
    /// Progress is reported on `events_tx`; a closed receiver does not stop
    /// the run.
    ///
    /// # Errors
    ///
    /// Returns the first step failure. Steps of the failing wave that were
    /// already running finish; no later wave starts.
    pub async fn run(
        &self,
        initial_state: S,
        events_tx: Sender<FlowEvent>,
    ) -> Result<FlowOutcome<S>, FlowError> {
        let state = StateHandle::new(initial_state);
        let run = Mutex::new(FlowRun::new(self.graph.name(), self.graph.step_names()));
        let flow_id = run.lock().await.id;

        tracing::info!(flow = self.graph.name(), %flow_id, dispatch = ?self.dispatch, "flow started");
        run.lock().await.status = FlowStatus::Running;
        let _ = events_tx
            .send(FlowEvent::FlowStarted {
                flow_id,
                flow_name: self.graph.name().to_string(),
            })
            .await;

        let mut completed: HashSet<String> = HashSet::new();

        loop {
            let wave: Vec<&StepNode<S>> = self
                .graph
                .nodes()
                .iter()
                .filter(|node| !completed.contains(&node.name))
                .filter(|node| {
                    node.trigger
                        .as_ref()
                        .map_or(true, |trigger| trigger.is_satisfied(&completed))
                })
                .collect();

            if wave.is_empty() {
                break;
            }

            tracing::debug!(
                steps = ?wave.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
                "dispatching wave"
            );

            let results = match self.dispatch {
                Dispatch::Sequential => {
                    let mut results = Vec::with_capacity(wave.len());
                    for node in &wave {
                        let result = self.run_step(node, &state, &run, &events_tx).await;
                        let failed = result.is_err();
                        results.push(result);
                        if failed {
                            break;
                        }
                    }
                    results
                }
                Dispatch::Concurrent => {
                    futures::future::join_all(
                        wave.iter()
                            .map(|node| self.run_step(node, &state, &run, &events_tx)),
                    )
                    .await
                }
            };

            let mut first_error = None;
            for result in results {
                match result {
                    Ok(name) => {
                        completed.insert(name);
                    }
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                }
            }

            if let Some(error) = first_error {
                let mut record = run.lock().await;
                record.status = FlowStatus::Failed;
                record.completed_at = Some(Utc::now());
                drop(record);

                tracing::error!(flow = self.graph.name(), %flow_id, %error, "flow failed");
                let _ = events_tx
                    .send(FlowEvent::FlowFailed {
                        flow_id,
                        error: error.to_string(),
                    })
                    .await;
                return Err(error);
            }
        }

        let mut record = run.into_inner();
        record.status = FlowStatus::Completed;
        record.completed_at = Some(Utc::now());

        tracing::info!(flow = self.graph.name(), %flow_id, "flow completed");
        let _ = events_tx.send(FlowEvent::FlowCompleted { flow_id }).await;

        Ok(FlowOutcome {
            state: state.snapshot().await,
            run: record,
        })
    }

    /// Run one step, keeping its record and the event stream in sync.
    ///
    /// Returns the step name on success.
    async fn run_step(
        &self,
        node: &StepNode<S>,
        state: &StateHandle<S>,
        run: &Mutex<FlowRun>,
        events_tx: &Sender<FlowEvent>,
    ) -> Result<String, FlowError> {
        let flow_id = {
            let mut record = run.lock().await;
            if let Some(step) = record.step_mut(&node.name) {
                step.status = StepStatus::Running;
                step.started_at = Some(Utc::now());
            }
            record.id
        };

        tracing::info!(step = %node.name, "step started");
        let _ = events_tx
            .send(FlowEvent::StepStarted {
                flow_id,
                step: node.name.clone(),
            })
            .await;

        let ctx = StepContext::new(flow_id, &node.name, state.clone(), events_tx.clone());
        let outcome = AssertUnwindSafe(node.step.run(&ctx)).catch_unwind().await;

        let result = match outcome {
            Ok(Ok(())) => Ok(node.name.clone()),
            Ok(Err(source)) => Err(FlowError::StepFailed {
                step: node.name.clone(),
                source,
            }),
            Err(panic) => Err(FlowError::StepPanicked {
                step: node.name.clone(),
                message: panic_message(panic.as_ref()),
            }),
        };

        {
            let mut record = run.lock().await;
            if let Some(step) = record.step_mut(&node.name) {
                step.finished_at = Some(Utc::now());
                match &result {
                    Ok(_) => step.status = StepStatus::Completed,
                    Err(e) => {
                        step.status = StepStatus::Failed;
                        step.error = Some(e.to_string());
                    }
                }
            }
            if result.is_ok() {
                record.completion_order.push(node.name.clone());
            }
        }

        match &result {
            Ok(_) => {
                tracing::info!(step = %node.name, "step completed");
                let _ = events_tx
                    .send(FlowEvent::StepCompleted {
                        flow_id,
                        step: node.name.clone(),
                    })
                    .await;
            }
            Err(e) => {
                tracing::error!(step = %node.name, error = %e, "step failed");
                let _ = events_tx
                    .send(FlowEvent::StepFailed {
                        flow_id,
                        step: node.name.clone(),
                        error: e.to_string(),
                    })
                    .await;
            }
        }

        result
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
