//! Subcommand implementations.

use crate::cli::KickoffArgs;
use crate::progress;
use cf_core::config::{load_project, ProjectConfig};
use cf_core::init::{generate_project, InitOptions};
use cf_core::poem::{PoemFlow, SentenceCount};
use color_eyre::eyre::{eyre, Result, WrapErr};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 64;

async fn load(root: &Path) -> Result<ProjectConfig> {
    load_project(root)
        .await
        .wrap_err_with(|| format!("loading project at {}", root.display()))
}

fn build_flow(project: &ProjectConfig) -> Result<PoemFlow> {
    PoemFlow::from_project(project).map_err(|e| eyre!("{e:#}"))
}

pub async fn kickoff(root: &Path, args: KickoffArgs) -> Result<()> {
    let project = load(root).await?;
    let mut flow = build_flow(&project)?;
    if let Some(count) = args.sentence_count {
        flow = flow.with_sentence_count(SentenceCount::fixed(count)?);
    } else if let Some(seed) = args.seed {
        flow = flow.with_sentence_count(SentenceCount::seeded(seed));
    }

    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let printer = tokio::spawn(progress::print_events(events_rx));
    let result = flow.kickoff(events_tx).await;
    printer.await?;

    let outcome = result?;
    let plot = flow.plot(&project.global.plot_name)?;

    println!();
    println!("{} {}", "sentence count:".bold(), outcome.state.sentence_count);
    println!("{} {}", "outputs:".bold(), flow.output_dir().display());
    println!("{} {}", "plot:".bold(), plot.display());
    Ok(())
}

pub async fn plot(root: &Path) -> Result<()> {
    let project = load(root).await?;
    let path = build_flow(&project)?
        .plot(&project.global.plot_name)
        .wrap_err("writing plot")?;
    println!("{} {}", "plot saved to".green(), path.display());
    Ok(())
}

pub async fn init(target_dir: PathBuf, force: bool) -> Result<()> {
    let written = generate_project(InitOptions { target_dir, force }).await?;
    for path in &written {
        println!("  {} {}", "created".green(), path.display());
    }
    println!("Run {} to start the flow.", "crewflow kickoff".bold());
    Ok(())
}

pub async fn crews(root: &Path, json: bool) -> Result<()> {
    let project = load(root).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project.crews)?);
        return Ok(());
    }

    if project.crews.is_empty() {
        println!("No crews under {}", project.root.join("crews").display());
        return Ok(());
    }

    for crew in &project.crews {
        println!("{}", crew.name.bold());
        for agent in &crew.agents {
            let llm = agent
                .spec
                .llm
                .as_deref()
                .unwrap_or(&project.global.default_llm);
            println!("  {} {} ({llm})", "agent".cyan(), agent.key);
        }
        for task in &crew.tasks {
            let agent = task.spec.agent.as_deref().unwrap_or("-");
            println!("  {} {} -> {agent}", "task".cyan(), task.key);
        }
    }
    Ok(())
}
