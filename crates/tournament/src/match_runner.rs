//! Match runner for playing games between engines

use std::path::Path;
use std::time::Duration;

use isola_core::{legal_moves, Board, BoardConfig, Engine, Game, GameStatus, Player, SearchLimits};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::elo::{GameResult, MatchResult};
use crate::error::TournamentError;

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub num_games: u32,
    /// Depth cap handed to the engines
    pub depth: u8,
    /// Maximum time per move in milliseconds (None = no limit)
    pub time_per_move_ms: Option<u64>,
    pub board: BoardConfig,
    /// Safety cap on turns before a game is scored as a draw
    pub max_turns: u32,
    /// Swap who moves first every game
    pub alternate_players: bool,
    /// Random turns played before the engines take over, so repeated games differ
    pub opening_turns: u32,
    pub opening_seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            depth: 4,
            time_per_move_ms: None,
            board: BoardConfig::default(),
            max_turns: 200,
            alternate_players: true,
            opening_turns: 0,
            opening_seed: 0,
        }
    }
}

impl MatchConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TournamentError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| TournamentError::io(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Fresh limits for one move (restarts the clock)
    fn search_limits(&self) -> SearchLimits {
        match self.time_per_move_ms {
            Some(ms) => SearchLimits::depth_and_time(self.depth, Duration::from_millis(ms)),
            None => SearchLimits::depth(self.depth),
        }
    }
}

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Result from the first mover's perspective
    pub result: GameResult,
    pub turns: u32,
    /// The losing engine gave up instead of being isolated on the board
    pub forfeit: bool,
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
    start: Board,
}

impl MatchRunner {
    /// Fails if the configured board is invalid.
    pub fn new(config: MatchConfig) -> Result<Self, TournamentError> {
        let start = Board::new(&config.board)?;
        Ok(Self { config, start })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two engines
    ///
    /// Returns the result from engine1's perspective
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            let engine1_first = !self.config.alternate_players || game_num % 2 == 0;

            let outcome = if engine1_first {
                self.play_game(engine1, engine2, game_num)
            } else {
                self.play_game(engine2, engine1, game_num)
            };
            let engine1_result = if engine1_first {
                outcome.result
            } else {
                outcome.result.flipped()
            };

            result.record(engine1_result);
            if outcome.forfeit && engine1_result == GameResult::Loss {
                result.forfeits += 1;
            }

            info!(
                game = game_num + 1,
                of = self.config.num_games,
                engine1_first,
                result = ?engine1_result,
                turns = outcome.turns,
                forfeit = outcome.forfeit,
                score = %format!("{}-{}-{}", result.wins, result.losses, result.draws),
                "game finished"
            );
        }

        result
    }

    /// Play a single game. `first` moves as player one.
    pub fn play_game(
        &self,
        first: &mut dyn Engine,
        second: &mut dyn Engine,
        game_num: u32,
    ) -> GameOutcome {
        let mut game = Game::new(self.start.clone(), Player::One);
        first.new_game();
        second.new_game();

        let mut turns = self.play_opening(&mut game, game_num);
        let mut forfeit = false;

        while !game.is_over() && turns < self.config.max_turns {
            let player = game.to_move();
            let engine: &mut dyn Engine = match player {
                Player::One => &mut *first,
                Player::Two => &mut *second,
            };

            let result = engine.search(game.board(), player, self.config.search_limits());
            match result.best_move {
                Some(mv) if game.apply(&mv) => {
                    debug!(?player, mv = %mv, depth = result.depth, score = result.score, "turn");
                    turns += 1;
                }
                Some(mv) => {
                    warn!(engine = engine.name(), mv = %mv, "illegal move, forfeiting");
                    game.forfeit();
                    forfeit = true;
                }
                None => {
                    // An isolated player is already caught by the game itself
                    warn!(engine = engine.name(), "no move returned, forfeiting");
                    game.forfeit();
                    forfeit = true;
                }
            }
        }

        let result = match game.status() {
            GameStatus::Player1Won => GameResult::Win,
            GameStatus::Player2Won => GameResult::Loss,
            GameStatus::Ongoing => GameResult::Draw,
        };
        GameOutcome {
            result,
            turns,
            forfeit,
        }
    }

    /// Plays the configured number of random turns. Returns how many were played.
    fn play_opening(&self, game: &mut Game, game_num: u32) -> u32 {
        if self.config.opening_turns == 0 {
            return 0;
        }
        // Both games of a colour-swapped pair share an opening
        let pair = u64::from(game_num / 2);
        let mut rng = StdRng::seed_from_u64(self.config.opening_seed.wrapping_add(pair));

        let mut played = 0;
        while played < self.config.opening_turns && !game.is_over() {
            let moves = legal_moves(game.board(), game.to_move());
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            if !game.apply(mv) {
                break;
            }
            played += 1;
        }
        played
    }
}

/// Quick utility to run a single match on the standard board
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
    depth: u8,
) -> Result<MatchResult, TournamentError> {
    let config = MatchConfig {
        num_games,
        depth,
        ..Default::default()
    };
    let runner = MatchRunner::new(config)?;
    Ok(runner.run_match(engine1, engine2))
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
