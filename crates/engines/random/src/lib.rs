//! Random Move Isola Engine
//!
//! Picks a move uniformly at random from every legal move-then-remove pair.
//! Useful for:
//! - Smoke-testing the match runner
//! - Baseline comparisons (the alpha-beta engine should beat it almost always)

use isola_core::{legal_moves_into, Board, Engine, Move, Player, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// An Isola engine that plays random legal moves.
///
/// The random source is owned by the engine, so a seeded engine replays the
/// same game against a deterministic opponent.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves: Vec<Move>,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            moves: Vec::new(),
            nodes: 0,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, player: Player, _limits: SearchLimits) -> SearchResult {
        legal_moves_into(board, player, &mut self.moves);
        self.nodes = 1;

        let best_move = self.moves.choose(&mut self.rng).copied();

        SearchResult {
            best_move,
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
