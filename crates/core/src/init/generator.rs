//! Writes the embedded templates into a project directory.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::config::loader::CONFIG_FILE;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Project root to create or fill.
    pub target_dir: PathBuf,

    /// Overwrite the files of an existing project.
    pub force: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
        }
    }
}

/// Scaffold a project and return the written paths.
///
/// ```text
/// <target_dir>/
/// ├── crewflow.toml
/// └── crews/
///     ├── dale_crew/config/{agents,tasks}.yaml
///     ├── image_crew/config/{agents,tasks}.yaml
///     └── poem_crew/config/{agents,tasks}.yaml
/// ```
///
/// Files that are not templates are left alone, even with `force`.
///
/// # Errors
///
/// [`InitError::AlreadyInitialized`] when `crewflow.toml` exists and
/// `force` is unset; I/O failures otherwise.
pub async fn generate_project(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let config_path = options.target_dir.join(CONFIG_FILE);
    if config_path.exists() && !options.force {
        return Err(InitError::AlreadyInitialized(options.target_dir));
    }

    fs::create_dir_all(&options.target_dir).map_err(|source| InitError::DirectoryCreate {
        path: options.target_dir.clone(),
        source,
    })?;

    let mut written = vec![write_template_file(&options.target_dir, CONFIG_FILE)?];
    for template in list_templates("crews/") {
        written.push(write_template_file(&options.target_dir, &template)?);
    }

    tracing::info!(dir = %options.target_dir.display(), files = written.len(), "project initialized");
    Ok(written)
}

fn write_template_file(root: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = root.join(template_path);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
