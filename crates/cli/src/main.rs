//! `crewflow`: run, plot and scaffold poem flow projects.

mod cli;
mod commands;
mod progress;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "crewflow=info,cf_core=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let project = cli.project.clone();

    match cli.into_command() {
        Command::Kickoff(args) => commands::kickoff(&project, args).await,
        Command::Plot => commands::plot(&project).await,
        Command::Init { target, force } => {
            commands::init(target.unwrap_or(project), force).await
        }
        Command::Crews { json } => commands::crews(&project, json).await,
    }
}
