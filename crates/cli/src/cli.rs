//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "crewflow",
    version,
    about = "Run the poem flow: YAML-configured crews wired into a step graph"
)]
pub struct Cli {
    /// Project root holding crewflow.toml and crews/.
    #[arg(long, short, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Defaults to `kickoff`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the flow to completion, then write the plot.
    Kickoff(KickoffArgs),

    /// Write the flow plot without running anything.
    Plot,

    /// Scaffold crewflow.toml and the three crews' YAML.
    Init {
        /// Directory to scaffold into; defaults to --project.
        #[arg(long)]
        target: Option<PathBuf>,

        /// Overwrite an existing project's template files.
        #[arg(long)]
        force: bool,
    },

    /// List the project's crews with their agents and tasks.
    Crews {
        /// Print the loaded definitions as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct KickoffArgs {
    /// Use this sentence count (3 to 5) instead of drawing one.
    #[arg(long, conflicts_with = "seed", value_parser = clap::value_parser!(u32).range(3..=5))]
    pub sentence_count: Option<u32>,

    /// Seed for the sentence-count draw.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// The subcommand to run, with `kickoff` filled in when none was given.
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Kickoff(KickoffArgs::default()))
    }
}
