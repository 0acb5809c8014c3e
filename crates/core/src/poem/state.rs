//! The poem flow's state record and sentence-count source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Every sentence count the flow accepts, drawn or injected.
pub const SENTENCE_RANGE: RangeInclusive<u32> = 3..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sentence count {0} is outside {min}..={max}", min = SENTENCE_RANGE.start(), max = SENTENCE_RANGE.end())]
pub struct SentenceCountOutOfRange(pub u32);

/// State carried through one poem flow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemState {
    pub sentence_count: u32,
    pub poem: String,
    pub image_description: String,
}

impl Default for PoemState {
    fn default() -> Self {
        Self {
            sentence_count: 1,
            poem: String::new(),
            image_description: String::new(),
        }
    }
}

/// Where `generate_sentence_count` gets its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceCount {
    /// Uniform in [`SENTENCE_RANGE`]; seeded draws are reproducible.
    Random { seed: Option<u64> },
    /// Always this value. Prefer [`SentenceCount::fixed`], which checks the
    /// range up front; [`SentenceCount::draw`] rejects it otherwise.
    Fixed(u32),
}

impl Default for SentenceCount {
    fn default() -> Self {
        Self::Random { seed: None }
    }
}

impl SentenceCount {
    pub fn seeded(seed: u64) -> Self {
        Self::Random { seed: Some(seed) }
    }

    pub fn fixed(count: u32) -> Result<Self, SentenceCountOutOfRange> {
        if SENTENCE_RANGE.contains(&count) {
            Ok(Self::Fixed(count))
        } else {
            Err(SentenceCountOutOfRange(count))
        }
    }

    pub fn draw(&self) -> Result<u32, SentenceCountOutOfRange> {
        match self {
            Self::Fixed(n) if SENTENCE_RANGE.contains(n) => Ok(*n),
            Self::Fixed(n) => Err(SentenceCountOutOfRange(*n)),
            Self::Random { seed: Some(seed) } => {
                Ok(StdRng::seed_from_u64(*seed).gen_range(SENTENCE_RANGE))
            }
            Self::Random { seed: None } => Ok(rand::thread_rng().gen_range(SENTENCE_RANGE)),
        }
    }
}
