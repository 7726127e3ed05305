use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::*;

/// Whether a start cell may be removed once its owner has stepped off it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartFieldPolicy {
    /// Start cells are never removable; only plain tiles are.
    #[default]
    Protected,
    /// An unoccupied start cell is removable just like a tile.
    RemovableWhenVacated,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub player1_start: Pos,
    pub player2_start: Pos,
    pub start_fields: StartFieldPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 8,
            player1_start: Pos::new(5, 3),
            player2_start: Pos::new(0, 4),
            start_fields: StartFieldPolicy::Protected,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("start cell {pos} lies outside a {rows}x{cols} board")]
    StartOutOfBounds { pos: Pos, rows: usize, cols: usize },
    #[error("both players cannot start on {0}")]
    SharedStart(Pos),
    #[error("layout row {row} has {found} columns, expected {expected}")]
    RaggedLayout { row: usize, found: usize, expected: usize },
    #[error("unknown layout character {ch:?} at {pos}")]
    UnknownCell { ch: char, pos: Pos },
    #[error("layout places {player:?} {count} times, expected exactly once")]
    TokenCount { player: Player, count: usize },
}

/// An Isola board: a grid of cells plus both token positions.
///
/// The board is a plain value. Search code clones it freely and never shares
/// a mutable board between threads.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    positions: [Pos; 2],
    policy: StartFieldPolicy,
}

impl Board {
    /// The reference 6x8 board.
    pub fn standard() -> Self {
        Self::from_config(&BoardConfig::default())
    }

    pub fn new(config: &BoardConfig) -> Result<Self, BoardError> {
        let (rows, cols) = (config.rows, config.cols);
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        for pos in [config.player1_start, config.player2_start] {
            if pos.row >= rows || pos.col >= cols {
                return Err(BoardError::StartOutOfBounds { pos, rows, cols });
            }
        }
        if config.player1_start == config.player2_start {
            return Err(BoardError::SharedStart(config.player1_start));
        }
        Ok(Self::from_config(config))
    }

    /// Full board with both tokens on their start cells. `config` must already be valid.
    fn from_config(config: &BoardConfig) -> Self {
        let mut board = Self {
            rows: config.rows,
            cols: config.cols,
            cells: vec![Cell::Tile; config.rows * config.cols],
            positions: [config.player1_start, config.player2_start],
            policy: config.start_fields,
        };
        board.set_cell(config.player1_start, Cell::Start(Player::One));
        board.set_cell(config.player2_start, Cell::Start(Player::Two));
        board
    }

    /// Parses a text layout, one string per row.
    ///
    /// `o` tile, `.` empty, `S`/`T` vacated start cells of player one/two,
    /// `1`/`2` a token on its own start cell, `a`/`b` a token on a plain tile,
    /// `x`/`y` player one/two standing on the other player's start cell.
    /// Whitespace inside a row is ignored.
    pub fn from_layout(rows: &[&str], policy: StartFieldPolicy) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<char>> = rows
            .iter()
            .map(|r| r.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::InvalidDimensions {
                rows: height,
                cols: width,
            });
        }

        let mut cells = Vec::with_capacity(height * width);
        let mut tokens: [Vec<Pos>; 2] = [Vec::new(), Vec::new()];
        for (row, line) in parsed.iter().enumerate() {
            if line.len() != width {
                return Err(BoardError::RaggedLayout {
                    row,
                    found: line.len(),
                    expected: width,
                });
            }
            for (col, &ch) in line.iter().enumerate() {
                let pos = Pos::new(row, col);
                let cell = match ch {
                    'o' => Cell::Tile,
                    '.' => Cell::Empty,
                    'S' => Cell::Start(Player::One),
                    'T' => Cell::Start(Player::Two),
                    '1' => {
                        tokens[0].push(pos);
                        Cell::Start(Player::One)
                    }
                    '2' => {
                        tokens[1].push(pos);
                        Cell::Start(Player::Two)
                    }
                    'a' => {
                        tokens[0].push(pos);
                        Cell::Tile
                    }
                    'b' => {
                        tokens[1].push(pos);
                        Cell::Tile
                    }
                    'x' => {
                        tokens[0].push(pos);
                        Cell::Start(Player::Two)
                    }
                    'y' => {
                        tokens[1].push(pos);
                        Cell::Start(Player::One)
                    }
                    _ => return Err(BoardError::UnknownCell { ch, pos }),
                };
                cells.push(cell);
            }
        }

        for player in Player::ALL {
            let count = tokens[player.idx()].len();
            if count != 1 {
                return Err(BoardError::TokenCount { player, count });
            }
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells,
            positions: [tokens[0][0], tokens[1][0]],
            policy,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn policy(&self) -> StartFieldPolicy {
        self.policy
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Cell contents, or `None` when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &c)| (Pos::new(i / self.cols, i % self.cols), c))
    }

    #[inline]
    pub fn position(&self, player: Player) -> Pos {
        self.positions[player.idx()]
    }

    pub fn player_at(&self, pos: Pos) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.position(p) == pos)
    }

    /// True for removed cells. Out-of-bounds coordinates count as empty.
    pub fn is_tile_empty(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_none_or(Cell::is_empty)
    }

    fn set_cell(&mut self, pos: Pos, cell: Cell) {
        let idx = pos.row * self.cols + pos.col;
        self.cells[idx] = cell;
    }

    /// Whether `player` could step onto (row, col) right now.
    pub fn can_move(&self, player: Player, row: usize, col: usize) -> bool {
        let Some(cell) = self.cell(row, col) else {
            return false;
        };
        let to = Pos::new(row, col);
        if self.position(player).chebyshev(to) != 1 {
            return false;
        }
        if self.position(player.other()) == to {
            return false;
        }
        !cell.is_empty()
    }

    /// Steps `player` one cell in any direction. Returns false and leaves the
    /// board unchanged when the destination is out of bounds, not adjacent,
    /// occupied by the opponent, or removed.
    pub fn move_player(&mut self, player: Player, row: usize, col: usize) -> bool {
        if !self.can_move(player, row, col) {
            return false;
        }
        self.positions[player.idx()] = Pos::new(row, col);
        true
    }

    /// Whether the cell at (row, col) could be removed right now.
    pub fn can_remove(&self, row: usize, col: usize) -> bool {
        let Some(cell) = self.cell(row, col) else {
            return false;
        };
        if self.player_at(Pos::new(row, col)).is_some() {
            return false;
        }
        match cell {
            Cell::Tile => true,
            Cell::Start(_) => self.policy == StartFieldPolicy::RemovableWhenVacated,
            Cell::Empty => false,
        }
    }

    /// Removes the tile at (row, col), turning it into an empty cell.
    pub fn remove_tile(&mut self, row: usize, col: usize) -> bool {
        if !self.can_remove(row, col) {
            return false;
        }
        self.set_cell(Pos::new(row, col), Cell::Empty);
        true
    }

    /// Replays a full turn for `player`. Either both steps happen or neither does.
    pub fn apply_move(&mut self, player: Player, mv: &Move) -> bool {
        if self.position(player) != mv.from || !self.can_move(player, mv.to.row, mv.to.col) {
            return false;
        }
        let previous = self.position(player);
        self.positions[player.idx()] = mv.to;
        if !self.remove_tile(mv.remove.row, mv.remove.col) {
            self.positions[player.idx()] = previous;
            return false;
        }
        true
    }

    /// Number of cells that could be removed right now.
    pub fn count_removable_tiles(&self) -> usize {
        self.cells()
            .filter(|&(pos, _)| self.can_remove(pos.row, pos.col))
            .count()
    }

    /// True when `player` has no move that can be followed by a removal.
    ///
    /// Each neighbouring destination is tried on a scratch copy of the board and
    /// the whole grid is scanned for a removable cell afterwards.
    pub fn is_player_isolated(&self, player: Player) -> bool {
        let from = self.position(player);
        for (dr, dc) in NEIGHBOR_OFFSETS {
            let Some(to) = from.offset(dr, dc, self.rows, self.cols) else {
                continue;
            };
            let mut scratch = self.clone();
            if !scratch.move_player(player, to.row, to.col) {
                continue;
            }
            let any_removable = scratch
                .cells()
                .any(|(pos, _)| scratch.can_remove(pos.row, pos.col));
            if any_removable {
                return false;
            }
        }
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
