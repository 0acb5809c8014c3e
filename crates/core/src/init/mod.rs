//! Project scaffolding.
//!
//! `crewflow init` writes a ready-to-run poem flow project: `crewflow.toml`
//! plus the YAML configs of the three crews under `crews/`.
//!
//! ```no_run
//! use cf_core::init::{generate_project, InitOptions};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let written = generate_project(InitOptions {
//!     target_dir: PathBuf::from("poem_flow"),
//!     force: false,
//! })
//! .await?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_project, InitOptions};
pub use templates::{get_template, list_templates};
