use cf_protocol::*;
use serde_json;
use serde_yaml;

#[test]
fn test_agents_yaml_deserialization() {
    let yaml_str = r#"
poem_writer:
  role: >
    CrewAI Poem Writer
  goal: >
    Generate a poem with a sentence count of {sentence_count}
  backstory: >
    You're a creative poet.
  llm: claude-sonnet-4
editor:
  role: Editor
  goal: Polish the poem
  backstory: You fix rhythm.
  verbose: true
"#;

    let agents: NamedList<AgentSpec> =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize agents");

    assert_eq!(agents.len(), 2);
    // Document order is preserved
    assert_eq!(agents.keys().collect::<Vec<_>>(), vec!["poem_writer", "editor"]);

    let writer = agents.get("poem_writer").expect("poem_writer missing");
    assert_eq!(writer.role.trim(), "CrewAI Poem Writer");
    assert!(writer.goal.contains("{sentence_count}"));
    assert_eq!(writer.llm.as_deref(), Some("claude-sonnet-4"));
    assert!(!writer.verbose);

    let editor = agents.get("editor").expect("editor missing");
    assert_eq!(editor.llm, None);
    assert!(editor.verbose);
}

#[test]
fn test_tasks_yaml_deserialization() {
    let yaml_str = r#"
image_describer_task:
  description: >
    Describe an image for this poem: {poem}
  expected_output: >
    One paragraph.
  agent: image_describer
  output_file: description.md
"#;

    let tasks: NamedList<TaskSpec> =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize tasks");

    let task = tasks.get("image_describer_task").expect("task missing");
    assert!(task.description.contains("{poem}"));
    assert_eq!(task.agent.as_deref(), Some("image_describer"));
    assert_eq!(task.output_file.as_deref(), Some("description.md"));
}

#[test]
fn test_named_list_rejects_duplicate_keys() {
    // serde_yaml itself rejects duplicate keys in one mapping, so go through JSON
    // which hands every entry to the visitor.
    let json = r#"{"a": {"description": "x", "expected_output": "y"},
                   "a": {"description": "z", "expected_output": "w"}}"#;

    let result: Result<NamedList<TaskSpec>, _> = serde_json::from_str(json);
    let err = result.expect_err("duplicate keys should be rejected");
    assert!(err.to_string().contains("duplicate definition for 'a'"));
}

#[test]
fn test_named_list_serialization_keeps_order() {
    let mut list = NamedList::new();
    list.push(
        "zeta",
        TaskSpec {
            description: "first".to_string(),
            expected_output: "out".to_string(),
            agent: None,
            output_file: None,
        },
    );
    list.push(
        "alpha",
        TaskSpec {
            description: "second".to_string(),
            expected_output: "out".to_string(),
            agent: None,
            output_file: None,
        },
    );

    let json = serde_json::to_string(&list).expect("Failed to serialize NamedList");
    let zeta = json.find("zeta").expect("zeta missing");
    let alpha = json.find("alpha").expect("alpha missing");
    assert!(zeta < alpha, "serialization should keep insertion order");

    let back: NamedList<TaskSpec> = serde_json::from_str(&json).expect("round trip failed");
    assert_eq!(back, list);
}

#[test]
fn test_global_config_defaults() {
    let config: GlobalConfig = toml::from_str("").expect("empty toml should parse");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.output_dir, ".");
    assert_eq!(config.plot_name, "my_plot_flow");
    assert_eq!(config.dispatch, Dispatch::Sequential);
    assert_eq!(config.default_llm, "gpt-4o-mini");
    assert_eq!(config.fallback_llm, None);
}

#[test]
fn test_global_config_from_toml() {
    let toml_str = r#"
output_dir = "out"
plot_name = "poem_graph"
dispatch = "concurrent"
default_llm = "claude-sonnet-4"
fallback_llm = "gpt-4o"
"#;

    let config: GlobalConfig = toml::from_str(toml_str).expect("Failed to parse GlobalConfig");

    assert_eq!(config.output_dir, "out");
    assert_eq!(config.plot_name, "poem_graph");
    assert_eq!(config.dispatch, Dispatch::Concurrent);
    assert_eq!(config.default_llm, "claude-sonnet-4");
    assert_eq!(config.fallback_llm.as_deref(), Some("gpt-4o"));
}

#[test]
fn test_flow_status_serialization() {
    let json = serde_json::to_value(FlowStatus::Running).expect("Failed to serialize FlowStatus");
    assert_eq!(json, "RUNNING");

    let json = serde_json::to_value(StepStatus::Completed).expect("Failed to serialize StepStatus");
    assert_eq!(json, "COMPLETED");
}

#[test]
fn test_flow_run_new() {
    let run = FlowRun::new("poem_flow", ["a", "b"]);

    assert_eq!(run.flow_name, "poem_flow");
    assert_eq!(run.status, FlowStatus::Pending);
    assert_eq!(run.steps.len(), 2);
    assert!(run.steps.iter().all(|s| s.status == StepStatus::Pending));
    assert!(run.step("b").is_some());
    assert!(run.step("c").is_none());
    assert!(run.completion_order.is_empty());
}

#[test]
fn test_flow_event_serialization() {
    use uuid::Uuid;

    let flow_id = Uuid::new_v4();
    let event = FlowEvent::StepCompleted {
        flow_id,
        step: "generate_poem".to_string(),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize FlowEvent");
    assert_eq!(json["type"], "stepCompleted");
    assert_eq!(json["payload"]["step"], "generate_poem");

    assert_eq!(event.flow_id(), flow_id);
    assert!(!event.is_terminal());
    assert!(FlowEvent::FlowCompleted { flow_id }.is_terminal());
    assert!(FlowEvent::FlowFailed {
        flow_id,
        error: "boom".to_string()
    }
    .is_terminal());
}
