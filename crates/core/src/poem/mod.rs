//! The example flow: a poem, an image description and an image reference.

pub mod flow;
pub mod state;

pub use flow::{
    steps, with_image_crew_hooks, PoemCrews, PoemFlow, DALE_CREW, EXTRA_DATA, FLOW_NAME, IMAGE_CREW,
    IMAGE_DESCRIPTION_FILE, IMAGE_FILE, POEM_CREW, POEM_FILE,
};
pub use state::{PoemState, SentenceCount, SentenceCountOutOfRange, SENTENCE_RANGE};
