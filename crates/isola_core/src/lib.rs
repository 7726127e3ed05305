pub mod board;
pub mod game;
pub mod movegen;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use game::*;
pub use movegen::*;
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every Isola engine (alpha-beta, random, ...)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if the player is isolated)
    pub best_move: Option<Move>,
    /// Evaluation score, positive favours player one. Proven wins and losses are infinite.
    pub score: f64,
    /// Deepest fully completed search depth
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
    /// Whether search was stopped early due to time limit
    pub stopped: bool,
}

/// Trait that all Isola engines implement.
///
/// Match runners and front-ends only see this trait, so engines can be swapped
/// freely.
pub trait Engine: Send {
    /// Pick a move for `player` on `board` within the given limits.
    ///
    /// The board is never modified; any returned move is legal against it.
    fn search(&mut self, board: &Board, player: Player, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "Isola-engine"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a named option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
