use std::collections::{HashSet, VecDeque};

use crate::{board::Board, types::*};

/// Generate every legal (move, removal) pair, returning a freshly allocated vector.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut out = Vec::with_capacity(8 * board.rows() * board.cols());
    legal_moves_into(board, player, &mut out);
    out
}

/// Generate every legal (move, removal) pair into the provided buffer, reusing it across calls.
///
/// Each destination is played on a scratch copy and the removal scan runs against
/// the post-move board, so the cell the token just left is a removal candidate.
pub fn legal_moves_into(board: &Board, player: Player, out: &mut Vec<Move>) {
    out.clear();
    for_each_step(board, player, |after, from, to| {
        for (cell, _) in after.cells() {
            if after.can_remove(cell.row, cell.col) {
                out.push(Move::new(from, to, cell));
            }
        }
    });
}

/// Like [`legal_moves`] but only removes tiles within Manhattan distance `radius`
/// of the opponent.
///
/// Falls back to the full generator when the restricted scan finds nothing, so an
/// empty result still means the player is isolated.
pub fn legal_moves_within(board: &Board, player: Player, radius: usize) -> Vec<Move> {
    let target = board.position(player.other());
    let mut out = Vec::new();
    for_each_step(board, player, |after, from, to| {
        for (cell, _) in after.cells() {
            if cell.manhattan(target) <= radius && after.can_remove(cell.row, cell.col) {
                out.push(Move::new(from, to, cell));
            }
        }
    });
    if out.is_empty() {
        legal_moves_into(board, player, &mut out);
    }
    out
}

/// Mobility: the number of legal (move, removal) pairs for `player`.
pub fn count_moves(board: &Board, player: Player) -> usize {
    let mut count = 0;
    for_each_step(board, player, |after, _, _| {
        count += after
            .cells()
            .filter(|(cell, _)| after.can_remove(cell.row, cell.col))
            .count();
    });
    count
}

/// Number of distinct non-empty cells `player` can walk to within `radius` steps,
/// ignoring future removals. The origin is not counted and the opponent blocks.
pub fn reachable_cells(board: &Board, player: Player, radius: usize) -> usize {
    let start = board.position(player);
    let blocker = board.position(player.other());

    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);
    while let Some((pos, dist)) = queue.pop_front() {
        if dist == radius {
            continue;
        }
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let Some(next) = pos.offset(dr, dc, board.rows(), board.cols()) else {
                continue;
            };
            if next == blocker || board.is_tile_empty(next.row, next.col) {
                continue;
            }
            if visited.insert(next) {
                queue.push_back((next, dist + 1));
            }
        }
    }
    visited.len() - 1
}

fn for_each_step<F>(board: &Board, player: Player, mut visit: F)
where
    F: FnMut(&Board, Pos, Pos),
{
    let from = board.position(player);
    for (dr, dc) in NEIGHBOR_OFFSETS {
        let Some(to) = from.offset(dr, dc, board.rows(), board.cols()) else {
            continue;
        };
        let mut after = board.clone();
        if after.move_player(player, to.row, to.col) {
            visit(&after, from, to);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
