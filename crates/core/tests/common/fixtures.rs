//! Test fixtures: project directories, crew definitions and event capture.

use cf_protocol::{AgentSpec, CrewDefinition, FlowEvent, NamedList, TaskSpec};
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Write `crews/<crew>/config/{agents,tasks}.yaml` under `root`.
pub fn write_crew(root: &Path, crew: &str, agents_yaml: &str, tasks_yaml: &str) -> std::io::Result<()> {
    let config = root.join("crews").join(crew).join("config");
    std::fs::create_dir_all(&config)?;
    std::fs::write(config.join("agents.yaml"), agents_yaml)?;
    std::fs::write(config.join("tasks.yaml"), tasks_yaml)?;
    Ok(())
}

/// A temporary project with a single one-agent, one-task crew.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    std::fs::write(
        root.join("crewflow.toml"),
        "output_dir = \"out\"\nplot_name = \"test_plot\"\n",
    )?;

    write_crew(
        root,
        "haiku_crew",
        r#"
poet:
  role: Haiku Poet
  goal: Write haiku about {topic}
  backstory: You count syllables in your sleep.
"#,
        r#"
write_haiku:
  description: Write a haiku about {topic}.
  expected_output: Three lines.
  agent: poet
  output_file: "{topic}.txt"
"#,
    )?;

    Ok(temp_dir)
}

pub fn agent_spec(role: &str) -> AgentSpec {
    AgentSpec {
        role: role.to_string(),
        goal: format!("Be a good {role}"),
        backstory: format!("A seasoned {role}."),
        llm: Some("test-model".to_string()),
        verbose: false,
    }
}

pub fn task_spec(description: &str, agent: &str) -> TaskSpec {
    TaskSpec {
        description: description.to_string(),
        expected_output: "A short answer.".to_string(),
        agent: Some(agent.to_string()),
        output_file: None,
    }
}

/// An in-memory crew definition.
pub fn crew_definition(name: &str, agents: &[&str], tasks: Vec<(&str, TaskSpec)>) -> CrewDefinition {
    let mut agent_list = NamedList::new();
    for key in agents {
        agent_list.push(*key, agent_spec(key));
    }
    let mut task_list = NamedList::new();
    for (key, spec) in tasks {
        task_list.push(key, spec);
    }
    CrewDefinition {
        name: name.to_string(),
        agents: agent_list,
        tasks: task_list,
        process: Default::default(),
    }
}

/// A flow event channel whose receiving end is collected in the background.
///
/// Await the handle after the run to get every event in order.
pub fn event_collector() -> (mpsc::Sender<FlowEvent>, JoinHandle<Vec<FlowEvent>>) {
    let (tx, mut rx) = mpsc::channel(16);
    let handle = tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    });
    (tx, handle)
}
