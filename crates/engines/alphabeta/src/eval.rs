//! Mobility-based leaf evaluation.

use isola_core::{count_moves, Board, Cell, Player};
use serde::{Deserialize, Serialize};

/// Scores a leaf board. Positive favours player one, negative favours player two.
///
/// Implementations return `f64::INFINITY` / `f64::NEG_INFINITY` only for proven
/// results and must keep every other score finite.
pub trait Evaluate: Send + Sync {
    fn evaluate(&self, board: &Board, to_move: Player) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Bonus per unit of Manhattan distance a player is closer to a start cell than
    /// the opponent.
    pub start_distance_weight: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            start_distance_weight: 0.1,
        }
    }
}

/// Default evaluator: mobility difference plus a small positional tie-breaker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Pure mobility difference with no positional terms.
    pub fn mobility_only() -> Self {
        Self::new(EvalWeights {
            start_distance_weight: 0.0,
        })
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, board: &Board, to_move: Player) -> f64 {
        let mobility1 = count_moves(board, Player::One);
        let mobility2 = count_moves(board, Player::Two);

        match (mobility1 == 0, mobility2 == 0) {
            // Both stuck: whoever has to move now loses
            (true, true) => return loss_for(to_move),
            (true, false) => return f64::NEG_INFINITY,
            (false, true) => return f64::INFINITY,
            (false, false) => {}
        }

        let mut score = mobility1 as f64 - mobility2 as f64;
        if self.weights.start_distance_weight != 0.0 {
            if let (Some(d1), Some(d2)) = (
                start_distance(board, Player::One),
                start_distance(board, Player::Two),
            ) {
                score += self.weights.start_distance_weight * (d2 as f64 - d1 as f64);
            }
        }
        score
    }
}

/// Score of a proven loss for `player`.
pub fn loss_for(player: Player) -> f64 {
    match player {
        Player::One => f64::NEG_INFINITY,
        Player::Two => f64::INFINITY,
    }
}

/// Score of a proven win for `player`.
pub fn win_for(player: Player) -> f64 {
    -loss_for(player)
}

/// Manhattan distance from `player` to the nearest start cell still on the board.
fn start_distance(board: &Board, player: Player) -> Option<usize> {
    let pos = board.position(player);
    board
        .cells()
        .filter(|(_, cell)| matches!(cell, Cell::Start(_)))
        .map(|(start, _)| start.manhattan(pos))
        .min()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
