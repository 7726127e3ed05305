//! Uniform tie-breaking between equally scored moves.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Random source for tie-breaks.
///
/// A seeded tie-break restarts from its seed on every pick, so the same
/// candidate list always yields the same choice.
#[derive(Debug, Clone)]
pub enum TieBreak {
    Seeded(u64),
    Entropy(StdRng),
}

impl TieBreak {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => TieBreak::Seeded(seed),
            None => TieBreak::Entropy(StdRng::from_entropy()),
        }
    }

    /// Picks one element uniformly at random, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        match self {
            TieBreak::Seeded(seed) => items.choose(&mut StdRng::seed_from_u64(*seed)),
            TieBreak::Entropy(rng) => items.choose(rng),
        }
    }
}
