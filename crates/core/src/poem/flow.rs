//! The poem flow: write a poem, describe an image for it, generate the image.
//!
//! ```text
//! generate_sentence_count
//!   └─ generate_poem
//!        ├─ save_poem
//!        └─ generate_image_description
//!             ├─ save_image_description
//!             └─ generate_image
//! ```

use super::state::{PoemState, SentenceCount};
use crate::config::ProjectConfig;
use crate::crew::{Crew, CrewOutput, Inputs, Kickoff};
use crate::files::write_atomic;
use crate::flow::{FlowError, FlowGraph, FlowOutcome, FlowRunner, FlowStep, StepContext, Trigger};
use anyhow::Context;
use async_trait::async_trait;
use cf_protocol::config_models::Dispatch;
use cf_protocol::events::FlowEvent;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

pub const FLOW_NAME: &str = "PoemFlow";

pub const POEM_CREW: &str = "poem_crew";
pub const IMAGE_CREW: &str = "image_crew";
pub const DALE_CREW: &str = "dale_crew";

pub const POEM_FILE: &str = "poem.txt";
pub const IMAGE_DESCRIPTION_FILE: &str = "image_description.txt";
pub const IMAGE_FILE: &str = "image.txt";

/// Step names, in registration order.
pub mod steps {
    pub const GENERATE_SENTENCE_COUNT: &str = "generate_sentence_count";
    pub const GENERATE_POEM: &str = "generate_poem";
    pub const SAVE_POEM: &str = "save_poem";
    pub const GENERATE_IMAGE_DESCRIPTION: &str = "generate_image_description";
    pub const SAVE_IMAGE_DESCRIPTION: &str = "save_image_description";
    pub const GENERATE_IMAGE: &str = "generate_image";

    pub const ALL: [&str; 6] = [
        GENERATE_SENTENCE_COUNT,
        GENERATE_POEM,
        SAVE_POEM,
        GENERATE_IMAGE_DESCRIPTION,
        SAVE_IMAGE_DESCRIPTION,
        GENERATE_IMAGE,
    ];
}

/// The three crews the flow kicks off.
#[derive(Clone)]
pub struct PoemCrews {
    pub poem: Arc<dyn Kickoff>,
    pub image: Arc<dyn Kickoff>,
    pub dale: Arc<dyn Kickoff>,
}

impl PoemCrews {
    /// Build the crews from a loaded project.
    ///
    /// Output files named by tasks resolve against the project's output
    /// directory. The image crew gets the extra-data hooks.
    pub fn from_project(project: &ProjectConfig) -> anyhow::Result<Self> {
        let build = |name: &str| -> anyhow::Result<Crew> {
            let definition = project.crew(name)?.clone();
            let crew = Crew::from_definition(definition, &project.global)
                .with_context(|| format!("building crew '{name}'"))?;
            Ok(crew.with_base_dir(project.output_dir()))
        };

        Ok(Self {
            poem: Arc::new(build(POEM_CREW)?),
            image: Arc::new(with_image_crew_hooks(build(IMAGE_CREW)?)),
            dale: Arc::new(build(DALE_CREW)?),
        })
    }
}

/// Value the image crew's before-kickoff hook adds as `extra_data`.
pub const EXTRA_DATA: &str = "This is extra data";

/// Attach the image crew's hooks: add `extra_data` to the inputs before
/// kickoff and log the results afterwards.
pub fn with_image_crew_hooks(crew: Crew) -> Crew {
    crew.before_kickoff(|mut inputs: Inputs| {
        inputs.insert("extra_data".to_string(), EXTRA_DATA.into());
        inputs
    })
    .after_kickoff(|output: CrewOutput| {
        tracing::info!(results = %output.raw, "image crew finished");
        output
    })
}

struct PoemContext {
    crews: PoemCrews,
    output_dir: PathBuf,
    sentence_count: SentenceCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoemStep {
    GenerateSentenceCount,
    GeneratePoem,
    SavePoem,
    GenerateImageDescription,
    SaveImageDescription,
    GenerateImage,
}

struct PoemStepHandler {
    step: PoemStep,
    ctx: Arc<PoemContext>,
}

#[async_trait]
impl FlowStep<PoemState> for PoemStepHandler {
    async fn run(&self, step_ctx: &StepContext<PoemState>) -> anyhow::Result<()> {
        let state = step_ctx.state();
        let ctx = &self.ctx;

        match self.step {
            PoemStep::GenerateSentenceCount => {
                let count = ctx.sentence_count.draw()?;
                state.update(|s| s.sentence_count = count).await;
                step_ctx.log(format!("Sentence count: {count}")).await;
            }
            PoemStep::GeneratePoem => {
                let count = state.read(|s| s.sentence_count).await;
                let output = ctx
                    .crews
                    .poem
                    .kickoff(inputs("sentence_count", count.into()))
                    .await?;
                step_ctx.log(format!("Poem generated: {}", output.raw)).await;
                state.update(|s| s.poem = output.raw).await;
            }
            PoemStep::SavePoem => {
                let poem = state.read(|s| s.poem.clone()).await;
                let path = save(&ctx.output_dir, POEM_FILE, &poem)?;
                step_ctx.log(format!("Poem saved to {}", path.display())).await;
            }
            PoemStep::GenerateImageDescription => {
                let poem = state.read(|s| s.poem.clone()).await;
                let output = ctx.crews.image.kickoff(inputs("poem", poem.into())).await?;
                step_ctx
                    .log(format!("Image description generated: {}", output.raw))
                    .await;
                state.update(|s| s.image_description = output.raw).await;
            }
            PoemStep::SaveImageDescription => {
                let description = state.read(|s| s.image_description.clone()).await;
                let path = save(&ctx.output_dir, IMAGE_DESCRIPTION_FILE, &description)?;
                step_ctx
                    .log(format!("Image description saved to {}", path.display()))
                    .await;
            }
            PoemStep::GenerateImage => {
                let description = state.read(|s| s.image_description.clone()).await;
                let output = ctx
                    .crews
                    .dale
                    .kickoff(inputs("description", description.into()))
                    .await?;
                let path = save(&ctx.output_dir, IMAGE_FILE, &output.raw)?;
                step_ctx.log(format!("Image saved to {}", path.display())).await;
            }
        }

        Ok(())
    }
}

fn inputs(key: &str, value: serde_json::Value) -> Inputs {
    Inputs::from([(key.to_string(), value)])
}

fn save(dir: &Path, file: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join(file);
    write_atomic(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved");
    Ok(path)
}

/// The poem flow bound to its crews and output directory.
pub struct PoemFlow {
    ctx: Arc<PoemContext>,
    dispatch: Dispatch,
}

impl PoemFlow {
    pub fn new(crews: PoemCrews, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ctx: Arc::new(PoemContext {
                crews,
                output_dir: output_dir.into(),
                sentence_count: SentenceCount::default(),
            }),
            dispatch: Dispatch::default(),
        }
    }

    /// Build the flow from a loaded project, honouring its output directory
    /// and dispatch mode.
    pub fn from_project(project: &ProjectConfig) -> anyhow::Result<Self> {
        let crews = PoemCrews::from_project(project)?;
        Ok(Self::new(crews, project.output_dir()).with_dispatch(project.global.dispatch))
    }

    pub fn with_sentence_count(mut self, sentence_count: SentenceCount) -> Self {
        self.ctx = Arc::new(PoemContext {
            crews: self.ctx.crews.clone(),
            output_dir: self.ctx.output_dir.clone(),
            sentence_count,
        });
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.ctx.output_dir
    }

    /// The step graph.
    pub fn graph(&self) -> FlowGraph<PoemState> {
        let handler = |step| PoemStepHandler {
            step,
            ctx: Arc::clone(&self.ctx),
        };

        FlowGraph::new(FLOW_NAME)
            .start(
                steps::GENERATE_SENTENCE_COUNT,
                handler(PoemStep::GenerateSentenceCount),
            )
            .listen(
                steps::GENERATE_POEM,
                Trigger::after(steps::GENERATE_SENTENCE_COUNT),
                handler(PoemStep::GeneratePoem),
            )
            .listen(
                steps::SAVE_POEM,
                Trigger::after(steps::GENERATE_POEM),
                handler(PoemStep::SavePoem),
            )
            .listen(
                steps::GENERATE_IMAGE_DESCRIPTION,
                Trigger::after(steps::GENERATE_POEM),
                handler(PoemStep::GenerateImageDescription),
            )
            .listen(
                steps::SAVE_IMAGE_DESCRIPTION,
                Trigger::after(steps::GENERATE_IMAGE_DESCRIPTION),
                handler(PoemStep::SaveImageDescription),
            )
            .listen(
                steps::GENERATE_IMAGE,
                Trigger::after(steps::GENERATE_IMAGE_DESCRIPTION),
                handler(PoemStep::GenerateImage),
            )
    }

    /// Run the flow from the default state.
    pub async fn kickoff(
        &self,
        events_tx: Sender<FlowEvent>,
    ) -> Result<FlowOutcome<PoemState>, FlowError> {
        FlowRunner::new(self.graph(), self.dispatch)?
            .run(PoemState::default(), events_tx)
            .await
    }

    /// Write `<output_dir>/<plot_name>.html`.
    pub fn plot(&self, plot_name: &str) -> std::io::Result<PathBuf> {
        crate::flow::plot::write_plot(&self.graph(), &self.ctx.output_dir, plot_name)
    }
}
