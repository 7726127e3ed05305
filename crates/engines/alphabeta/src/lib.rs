//! Alpha-Beta Isola Engine
//!
//! Iterative-deepening minimax with alpha-beta pruning and a mobility evaluation.
//! Root candidates are scored in parallel on a worker pool owned by the engine;
//! depth and root width adapt to how open the board still is.

mod config;
mod eval;
mod pool;
mod search;
mod select;

use std::path::Path;
use std::time::{Duration, Instant};

use isola_core::{Board, Engine, Move, Player, SearchLimits, SearchResult, TimeControl};
use thiserror::Error;
use tracing::info;

pub use config::{BranchStep, ConfigError, DepthStep, SearchConfig};
pub use eval::{loss_for, win_for, EvalWeights, Evaluate, Evaluator};
pub use pool::WorkerPool;
pub use search::{order_root_moves, plan_search, SearchPlan};
pub use select::TieBreak;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start search workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Alpha-beta engine with its own worker pool.
///
/// The pool lives as long as the engine and is torn down when the engine is
/// dropped or [`AlphaBetaEngine::shutdown`] is called.
#[derive(Debug)]
pub struct AlphaBetaEngine<E: Evaluate = Evaluator> {
    config: SearchConfig,
    evaluator: E,
    pool: WorkerPool,
    tie_break: TieBreak,
    /// Node counter for statistics
    nodes: u64,
}

impl AlphaBetaEngine<Evaluator> {
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        let evaluator = Evaluator::new(config.eval);
        Self::with_evaluator(config, evaluator)
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Self::new(SearchConfig::load(path)?)
    }
}

impl<E: Evaluate> AlphaBetaEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Result<Self, EngineError> {
        let pool = WorkerPool::new(config.threads)?;
        let tie_break = TieBreak::new(config.seed);
        Ok(Self {
            config,
            evaluator,
            pool,
            tie_break,
            nodes: 0,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn threads(&self) -> usize {
        self.pool.threads()
    }

    /// Best move for `player`, or `None` when the player is isolated.
    ///
    /// Uses the configured depth cap and time budget. The board is only read;
    /// a returned move is always legal against it.
    pub fn find_best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        let tc = TimeControl::new(self.config.time_limit());
        let cap = self.config.depth_cap();
        self.run(board, player, cap, &tc).best_move
    }

    fn run(&mut self, board: &Board, player: Player, cap: u8, tc: &TimeControl) -> SearchResult {
        let started = Instant::now();
        tc.start();

        let outcome = search::iterative_deepening(
            board,
            player,
            &self.config,
            &self.evaluator,
            &self.pool,
            tc,
            cap,
        );
        self.nodes = outcome.nodes;
        let best_move = self.tie_break.pick(&outcome.best_moves).copied();

        match (&best_move, &outcome.plan) {
            (Some(mv), Some(plan)) => info!(
                ?player,
                mv = %mv,
                score = outcome.score,
                depth = outcome.depth,
                planned_depth = plan.depth,
                branch = plan.branch,
                ties = outcome.best_moves.len(),
                nodes = outcome.nodes,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "move chosen"
            ),
            _ => info!(
                ?player,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "no move available"
            ),
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() {
                outcome.score
            } else {
                loss_for(player)
            },
            depth: outcome.depth,
            nodes: outcome.nodes,
            stopped: outcome.stopped,
        }
    }

    /// Stops the worker threads and waits for them to exit. Dropping the engine
    /// has the same effect.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}

impl<E: Evaluate> Engine for AlphaBetaEngine<E> {
    fn search(&mut self, board: &Board, player: Player, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        // The configured depth stays a hard cap; limits can only lower it
        let cap = limits.depth.min(self.config.depth_cap()).max(1);
        let tc = match limits.move_time {
            Some(_) => limits.time_control.clone(),
            None => TimeControl::new(self.config.time_limit()),
        };
        self.run(board, player, cap, &tc)
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name {
            "depth" => match value.parse::<u8>() {
                Ok(depth) => {
                    self.config.max_search_depth = depth;
                    true
                }
                Err(_) => false,
            },
            "seed" => match value.parse::<u64>() {
                Ok(seed) => {
                    self.config.seed = Some(seed);
                    self.tie_break = TieBreak::new(Some(seed));
                    true
                }
                Err(_) => false,
            },
            "time" => match value.parse::<u64>() {
                Ok(ms) => {
                    self.config.time_limit_ms = Some(ms).filter(|&ms| ms > 0);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }
}

/// Shorthand for a fixed-depth engine with a deterministic tie-break.
pub fn seeded_engine(depth: u8, seed: u64) -> Result<AlphaBetaEngine, EngineError> {
    AlphaBetaEngine::new(SearchConfig {
        seed: Some(seed),
        ..SearchConfig::fixed_depth(depth)
    })
}

/// Convenience for callers that only have a millisecond budget.
pub fn limits_for(depth: u8, move_time_ms: Option<u64>) -> SearchLimits {
    match move_time_ms {
        Some(ms) => SearchLimits::depth_and_time(depth, Duration::from_millis(ms)),
        None => SearchLimits::depth(depth),
    }
}
