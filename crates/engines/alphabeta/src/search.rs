//! Iterative-deepening minimax with alpha-beta pruning.
//!
//! Root candidates are evaluated in parallel on the engine's worker pool, one
//! task per candidate. Everything below a root candidate runs sequentially on
//! the worker that picked it up.

use isola_core::{
    legal_moves, legal_moves_within, reachable_cells, Board, Move, Player, TimeControl,
};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::eval::{loss_for, win_for, Evaluate};
use crate::pool::WorkerPool;

/// Depth and root width chosen for one search, with the signals behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPlan {
    pub depth: u8,
    pub branch: usize,
    /// Cells the mover can walk to within the configured radius
    pub reachable: usize,
    pub removable: usize,
}

/// Maps board signals to an effective depth (capped at `cap`) and branch factor.
pub fn plan_search(
    board: &Board,
    player: Player,
    candidates: usize,
    config: &SearchConfig,
    cap: u8,
) -> SearchPlan {
    let reachable = reachable_cells(board, player, config.reach_radius());
    let removable = board.count_removable_tiles();
    SearchPlan {
        depth: config.depth_for(reachable, cap),
        branch: config.branch_for(removable, candidates),
        reachable,
        removable,
    }
}

/// Orders root candidates so removals next to the opponent come first.
///
/// `self_penalty` pushes removals close to the mover's new cell towards the back.
/// The sort is stable, so equal keys keep generation order.
pub fn order_root_moves(board: &Board, player: Player, moves: &mut [Move], self_penalty: f64) {
    let opponent = board.position(player.other());
    let key = |mv: &Move| {
        mv.remove.manhattan(opponent) as f64 - self_penalty * mv.remove.manhattan(mv.to) as f64
    };
    moves.sort_by(|a, b| key(a).total_cmp(&key(b)));
}

/// Per-task search state. Never shared between workers.
pub(crate) struct SearchContext<'a, E: ?Sized> {
    pub eval: &'a E,
    pub removal_radius: Option<usize>,
    /// `None` searches to completion regardless of the clock.
    pub time_control: Option<&'a TimeControl>,
    pub nodes: u64,
}

impl<'a, E: Evaluate + ?Sized> SearchContext<'a, E> {
    pub fn new(
        eval: &'a E,
        removal_radius: Option<usize>,
        time_control: Option<&'a TimeControl>,
    ) -> Self {
        Self {
            eval,
            removal_radius,
            time_control,
            nodes: 0,
        }
    }

    fn out_of_time(&self) -> bool {
        match self.time_control {
            Some(tc) => tc.is_stopped() || (tc.should_check_time(self.nodes) && tc.check_time()),
            None => false,
        }
    }

    fn children(&self, board: &Board, player: Player) -> Vec<Move> {
        match self.removal_radius {
            Some(radius) => legal_moves_within(board, player, radius),
            None => legal_moves(board, player),
        }
    }
}

/// Minimax with alpha-beta pruning. Player one maximizes, player two minimizes.
///
/// Returns (score, stopped) where stopped indicates the time budget ran out and
/// the score must be discarded.
pub(crate) fn minimax<E: Evaluate + ?Sized>(
    board: &Board,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    player: Player,
    ctx: &mut SearchContext<'_, E>,
) -> (f64, bool) {
    ctx.nodes += 1;
    if ctx.out_of_time() {
        return (0.0, true);
    }

    if depth == 0 {
        return (ctx.eval.evaluate(board, player), false);
    }
    if board.is_player_isolated(player) {
        return (loss_for(player), false);
    }
    if board.is_player_isolated(player.other()) {
        return (win_for(player), false);
    }

    let moves = ctx.children(board, player);
    if moves.is_empty() {
        return (loss_for(player), false);
    }

    let maximizing = player == Player::One;
    let mut best = loss_for(player);
    for mv in &moves {
        let mut child = board.clone();
        let applied = child.apply_move(player, mv);
        debug_assert!(applied, "generated move {mv} must apply");

        let (score, stopped) = minimax(&child, depth - 1, alpha, beta, player.other(), ctx);
        if stopped {
            return (best, true);
        }

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    (best, false)
}

/// Outcome of the whole iterative-deepening run.
#[derive(Debug, Clone)]
pub struct RootOutcome {
    /// Equally best moves from the deepest completed depth. Empty when the player
    /// is isolated or depth 1 could not be completed.
    pub best_moves: Vec<Move>,
    pub score: f64,
    /// Deepest completed depth (0 if none)
    pub depth: u8,
    pub nodes: u64,
    /// True if the time budget cut the search short
    pub stopped: bool,
    pub plan: Option<SearchPlan>,
}

impl RootOutcome {
    fn isolated(player: Player) -> Self {
        Self {
            best_moves: Vec::new(),
            score: loss_for(player),
            depth: 0,
            nodes: 0,
            stopped: false,
            plan: None,
        }
    }
}

/// Searches depths `1..=plan.depth`, each on the same ordered, truncated root list.
///
/// A depth only replaces the previous answer once every root task has finished.
/// Worker faults and the time budget abort the depth in progress and leave the
/// last completed depth standing. Depth 1 ignores the time budget.
pub fn iterative_deepening<E: Evaluate + ?Sized>(
    board: &Board,
    player: Player,
    config: &SearchConfig,
    eval: &E,
    pool: &WorkerPool,
    tc: &TimeControl,
    cap: u8,
) -> RootOutcome {
    let mut candidates = legal_moves(board, player);
    if candidates.is_empty() {
        return RootOutcome::isolated(player);
    }

    let plan = plan_search(board, player, candidates.len(), config, cap);
    order_root_moves(board, player, &mut candidates, config.order_self_penalty);
    let batch = &candidates[..plan.branch];
    debug!(
        ?player,
        candidates = candidates.len(),
        branch = plan.branch,
        depth = plan.depth,
        reachable = plan.reachable,
        removable = plan.removable,
        "search plan"
    );

    let mut outcome = RootOutcome {
        plan: Some(plan),
        ..RootOutcome::isolated(player)
    };

    for depth in 1..=plan.depth {
        if depth > 1 && tc.check_time() {
            outcome.stopped = true;
            break;
        }
        let budget = if depth > 1 { Some(tc) } else { None };

        let results = pool.map_ordered(batch, |mv| {
            let mut child = board.clone();
            let applied = child.apply_move(player, mv);
            debug_assert!(applied, "root move {mv} must apply");
            let mut ctx = SearchContext::new(eval, config.removal_radius, budget);
            let (score, stopped) = minimax(
                &child,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                player.other(),
                &mut ctx,
            );
            (score, stopped, ctx.nodes)
        });

        let mut layer: Vec<Move> = Vec::new();
        let mut layer_score = loss_for(player);
        let mut aborted = false;
        for (mv, result) in batch.iter().zip(results) {
            let Some((score, stopped, nodes)) = result else {
                warn!(depth, mv = %mv, "root task failed, keeping previous depth");
                aborted = true;
                break;
            };
            outcome.nodes += nodes;
            if stopped {
                outcome.stopped = true;
                aborted = true;
                break;
            }
            if score.is_nan() {
                continue;
            }

            let improves = match player {
                Player::One => score > layer_score,
                Player::Two => score < layer_score,
            };
            if layer.is_empty() || improves {
                layer_score = score;
                layer.clear();
                layer.push(*mv);
            } else if score == layer_score {
                layer.push(*mv);
            }
        }

        if aborted {
            warn!(depth, completed = outcome.depth, "depth aborted");
            break;
        }
        if layer.is_empty() {
            warn!(depth, "no viable root move at this depth");
            break;
        }

        debug!(
            depth,
            best = layer_score,
            ties = layer.len(),
            nodes = outcome.nodes,
            "depth complete"
        );
        outcome.best_moves = layer;
        outcome.score = layer_score;
        outcome.depth = depth;
    }

    outcome
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
