//! Project loader for the `crewflow.toml` + `crews/` directory structure.
//!
//! This module loads:
//! - `crewflow.toml`: project settings
//! - `crews/<crew>/config/agents.yaml`: agent specs, in document order
//! - `crews/<crew>/config/tasks.yaml`: task specs, in document order

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::ProjectConfig;
use cf_protocol::config_models::GlobalConfig;
use cf_protocol::crew_models::{CrewDefinition, NamedList, ProcessMode};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CONFIG_FILE: &str = "crewflow.toml";
pub const CREWS_DIR: &str = "crews";

/// Loads a project from `root`.
///
/// A missing `crewflow.toml` yields default settings and a missing `crews/`
/// directory yields no crews. Crews are returned sorted by name.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML or YAML syntax, or duplicate ids
/// - A crew directory lacks `agents.yaml` or `tasks.yaml`
pub async fn load_project(root: &Path) -> ConfigResult<ProjectConfig> {
    let global = load_global_config(root)?;
    let crews = load_crews(root)?;

    tracing::debug!(
        root = %root.display(),
        crews = crews.len(),
        "loaded project configuration"
    );

    Ok(ProjectConfig {
        root: root.to_path_buf(),
        global,
        crews,
    })
}

/// Loads settings from `crewflow.toml`.
fn load_global_config(root: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = root.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path,
        source,
    })
}

/// Loads every crew directory under `crews/`.
fn load_crews(root: &Path) -> ConfigResult<Vec<CrewDefinition>> {
    let crews_dir = root.join(CREWS_DIR);

    if !crews_dir.exists() {
        return Ok(Vec::new());
    }

    let mut crews = Vec::new();

    for entry in WalkDir::new(&crews_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: crews_dir.clone(),
            source,
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        crews.push(load_crew(entry.path(), name)?);
    }

    Ok(crews)
}

fn load_crew(crew_dir: &Path, name: String) -> ConfigResult<CrewDefinition> {
    let config_dir = crew_dir.join("config");

    let agents = load_named_list(&find_yaml(&config_dir, "agents")?)?;
    let tasks = load_named_list(&find_yaml(&config_dir, "tasks")?)?;

    Ok(CrewDefinition {
        name,
        agents,
        tasks,
        process: ProcessMode::Sequential,
    })
}

/// Locate `<stem>.yaml`, accepting `<stem>.yml` as well.
fn find_yaml(config_dir: &Path, stem: &str) -> ConfigResult<PathBuf> {
    ["yaml", "yml"]
        .iter()
        .map(|ext| config_dir.join(format!("{stem}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::InvalidConfig {
            path: config_dir.to_path_buf(),
            reason: format!("missing {stem}.yaml"),
        })
}

/// Parse a YAML mapping of ids to specs. An empty document is an empty list.
fn load_named_list<T: DeserializeOwned>(path: &Path) -> ConfigResult<NamedList<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'))
    {
        return Ok(NamedList::new());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_protocol::config_models::Dispatch;
    use std::fs;
    use tempfile::tempdir;

    fn write_crew(root: &Path, crew: &str, agents: &str, tasks: &str) {
        let config_dir = root.join(CREWS_DIR).join(crew).join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create crew config dir");
        fs::write(config_dir.join("agents.yaml"), agents).expect("Failed to write agents.yaml");
        fs::write(config_dir.join("tasks.yaml"), tasks).expect("Failed to write tasks.yaml");
    }

    const POEM_AGENTS: &str = r#"poem_writer:
  role: >
    CrewAI Poem Writer
  goal: >
    Generate a funny, light hearted poem with a sentence count of {sentence_count}
  backstory: >
    You're a creative poet.
"#;

    const POEM_TASKS: &str = r#"write_poem:
  description: >
    Write a poem with exactly {sentence_count} sentences.
  expected_output: >
    A beautifully crafted poem.
  agent: poem_writer
"#;

    #[tokio::test]
    async fn test_load_project_acceptance() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        fs::write(
            root.join(CONFIG_FILE),
            "output_dir = \"out\"\ndispatch = \"concurrent\"\nfallback_llm = \"claude-sonnet-4\"\n",
        )
        .expect("Failed to write crewflow.toml");
        write_crew(root, "poem_crew", POEM_AGENTS, POEM_TASKS);

        let project = load_project(root).await.expect("Failed to load project");

        assert_eq!(project.global.output_dir, "out");
        assert_eq!(project.global.dispatch, Dispatch::Concurrent);
        assert_eq!(project.global.fallback_llm.as_deref(), Some("claude-sonnet-4"));
        assert_eq!(project.output_dir(), root.join("out"));

        let crew = project.crew("poem_crew").expect("poem_crew should exist");
        let writer = crew.agents.get("poem_writer").expect("poem_writer should exist");
        assert_eq!(writer.role.trim(), "CrewAI Poem Writer");
        assert!(writer.goal.contains("{sentence_count}"));

        let task = crew.tasks.get("write_poem").expect("write_poem should exist");
        assert_eq!(task.agent.as_deref(), Some("poem_writer"));
    }

    #[tokio::test]
    async fn test_load_project_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        let project = load_project(dir.path())
            .await
            .expect("Should handle an empty project");

        assert_eq!(project.global, GlobalConfig::default());
        assert!(project.crews.is_empty());
    }

    #[tokio::test]
    async fn test_load_project_crews_sorted_and_files_ignored() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        write_crew(root, "zeta_crew", POEM_AGENTS, POEM_TASKS);
        write_crew(root, "alpha_crew", POEM_AGENTS, POEM_TASKS);
        fs::write(root.join(CREWS_DIR).join("README.md"), "notes").expect("Failed to write file");

        let project = load_project(root).await.expect("Should load crews");

        let names: Vec<_> = project.crews.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha_crew", "zeta_crew"]);
    }

    #[tokio::test]
    async fn test_load_project_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "dispatch = [invalid toml")
            .expect("Failed to write crewflow.toml");

        match load_project(dir.path()).await {
            Err(ConfigError::TomlParse { path, .. }) => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("Expected TomlParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_project_invalid_yaml() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_crew(dir.path(), "broken", "poem_writer:\n  role: [yaml", POEM_TASKS);

        match load_project(dir.path()).await {
            Err(ConfigError::YamlParse { path, .. }) => assert!(path.ends_with("agents.yaml")),
            other => panic!("Expected YamlParse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_project_duplicate_ids_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        let tasks = format!("{POEM_TASKS}{POEM_TASKS}");
        write_crew(dir.path(), "dup", POEM_AGENTS, &tasks);

        let result = load_project(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::YamlParse { .. })));
    }

    #[tokio::test]
    async fn test_load_project_missing_tasks_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config_dir = dir.path().join(CREWS_DIR).join("half_crew").join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create dir");
        fs::write(config_dir.join("agents.yaml"), POEM_AGENTS).expect("Failed to write");

        match load_project(dir.path()).await {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("tasks.yaml"))
            }
            other => panic!("Expected InvalidConfig error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_project_empty_yaml_and_yml_extension() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config_dir = dir.path().join(CREWS_DIR).join("quiet_crew").join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create dir");
        fs::write(config_dir.join("agents.yml"), POEM_AGENTS).expect("Failed to write");
        fs::write(config_dir.join("tasks.yaml"), "# nothing yet\n\n").expect("Failed to write");

        let project = load_project(dir.path()).await.expect("Should load");
        let crew = project.crew("quiet_crew").expect("crew should exist");

        assert_eq!(crew.agents.len(), 1);
        assert!(crew.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_crew() {
        let dir = tempdir().expect("Failed to create temp dir");
        let project = load_project(dir.path()).await.expect("Should load");

        match project.crew("missing") {
            Err(ConfigError::UnknownCrew { name, .. }) => assert_eq!(name, "missing"),
            other => panic!("Expected UnknownCrew, got {other:?}"),
        }
    }
}
