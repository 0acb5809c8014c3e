//! Terminal rendering of flow progress events.

use cf_protocol::FlowEvent;
use colored::Colorize;
use tokio::sync::mpsc::Receiver;

/// One line describing `event`.
pub fn render(event: &FlowEvent) -> String {
    match event {
        FlowEvent::FlowStarted { flow_name, flow_id } => {
            format!("{} {flow_name} ({flow_id})", "▶ flow".bold().cyan())
        }
        FlowEvent::StepStarted { step, .. } => format!("  {} {step}", "→".cyan()),
        FlowEvent::StepCompleted { step, .. } => format!("  {} {step}", "✓".green()),
        FlowEvent::StepFailed { step, error, .. } => {
            format!("  {} {step}: {}", "✗".red(), error.red())
        }
        FlowEvent::LogChunk { content, .. } => format!("    {}", content.dimmed()),
        FlowEvent::FlowCompleted { .. } => format!("{}", "■ flow completed".bold().green()),
        FlowEvent::FlowFailed { error, .. } => {
            format!("{} {error}", "■ flow failed:".bold().red())
        }
    }
}

/// Print every event until all senders are dropped.
pub async fn print_events(mut events_rx: Receiver<FlowEvent>) {
    while let Some(event) = events_rx.recv().await {
        println!("{}", render(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_render_plain() {
        colored::control::set_override(false);
        let flow_id = Uuid::nil();

        assert_eq!(
            render(&FlowEvent::StepCompleted {
                flow_id,
                step: "save_poem".to_string()
            }),
            "  ✓ save_poem"
        );
        assert_eq!(
            render(&FlowEvent::StepFailed {
                flow_id,
                step: "generate_poem".to_string(),
                error: "no agent".to_string()
            }),
            "  ✗ generate_poem: no agent"
        );
        assert_eq!(
            render(&FlowEvent::LogChunk {
                flow_id,
                content: "Sentence count: 4".to_string()
            }),
            "    Sentence count: 4"
        );
        assert_eq!(render(&FlowEvent::FlowCompleted { flow_id }), "■ flow completed");
    }
}
