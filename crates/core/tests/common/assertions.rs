//! Assertion helpers over flow events and run records.

use cf_protocol::{FlowEvent, FlowRun, StepStatus};

/// Names of the steps that emitted `StepCompleted`, in event order.
pub fn completed_steps(events: &[FlowEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            FlowEvent::StepCompleted { step, .. } => Some(step.clone()),
            _ => None,
        })
        .collect()
}

pub fn log_lines(events: &[FlowEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            FlowEvent::LogChunk { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

/// First event is `FlowStarted`, last is terminal, and every event carries
/// the same run id.
pub fn assert_event_sequence(events: &[FlowEvent]) {
    assert!(!events.is_empty(), "Event sequence is empty");
    assert!(
        matches!(events[0], FlowEvent::FlowStarted { .. }),
        "First event should be FlowStarted, got: {:?}",
        events[0]
    );

    let last = events.last().unwrap();
    assert!(last.is_terminal(), "Last event should be terminal, got: {last:?}");

    let flow_id = events[0].flow_id();
    assert!(events.iter().all(|e| e.flow_id() == flow_id), "Mixed flow ids");
}

/// `before` finished no later than `after` started.
pub fn assert_ran_before(run: &FlowRun, before: &str, after: &str) {
    let first = run.step(before).unwrap_or_else(|| panic!("no record for {before}"));
    let second = run.step(after).unwrap_or_else(|| panic!("no record for {after}"));
    assert_eq!(first.status, StepStatus::Completed, "{before} did not complete");

    let finished = first.finished_at.expect("finished_at");
    let started = second.started_at.expect("started_at");
    assert!(
        finished <= started,
        "{before} finished at {finished} but {after} started at {started}"
    );
}

/// Every step in `run` completed exactly once.
pub fn assert_all_completed_once(run: &FlowRun) {
    for step in &run.steps {
        assert_eq!(step.status, StepStatus::Completed, "step {}", step.name);
        let runs = run.completion_order.iter().filter(|s| **s == step.name).count();
        assert_eq!(runs, 1, "step {} completed {runs} times", step.name);
    }
}
