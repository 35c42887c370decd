//! Builds the shuffled sequence a sort starts from

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SortError};
use crate::model::Sequence;

/// Partner range used by the Fisher-Yates pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// `j` drawn from `[0, i]`, every permutation equally likely
    #[default]
    Uniform,
    /// `j` drawn from `[0, i)`, as the first visualizer did. Every slot is
    /// forced to move, so the result is always one single cycle.
    Classic,
}

impl ShuffleMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShuffleMode::Uniform => "Uniform",
            ShuffleMode::Classic => "Classic",
        }
    }
}

/// Build a uniformly shuffled permutation of `1..=length`
pub fn build(length: usize) -> Result<Sequence> {
    build_with(length, ShuffleMode::default(), &mut rand::rng())
}

/// Build a reproducible permutation, same seed gives the same array
pub fn build_seeded(length: usize, mode: ShuffleMode, seed: u64) -> Result<Sequence> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    build_with(length, mode, &mut rng)
}

/// Build `1..=length` and shuffle it with `rng`
pub fn build_with<R: Rng>(length: usize, mode: ShuffleMode, rng: &mut R) -> Result<Sequence> {
    if length == 0 {
        return Err(SortError::Configuration(
            "sequence length must be a positive integer".to_string(),
        ));
    }

    let mut seq = Sequence::ordered(length)?;
    shuffle_in_place(&mut seq, mode, rng)?;

    debug!(length, ?mode, "Built shuffled sequence");
    Ok(seq)
}

/// Fisher-Yates from the last slot down to 1, exchanging silently
pub fn shuffle_in_place<R: Rng>(seq: &mut Sequence, mode: ShuffleMode, rng: &mut R) -> Result<()> {
    for i in (1..seq.len()).rev() {
        let j = match mode {
            ShuffleMode::Uniform => rng.random_range(0..=i),
            ShuffleMode::Classic => rng.random_range(0..i),
        };
        seq.exchange(i, j)?;
    }
    Ok(())
}
