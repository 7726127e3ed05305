//! Turn tracking on top of [`Board`]: whose turn it is, which half of the turn
//! is pending, and whether someone has been isolated.

use serde::{Deserialize, Serialize};

use crate::{board::Board, types::*};

/// The half of a turn that is waiting for input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    MovePlayer,
    RemoveTile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Player1Won,
    Player2Won,
}

impl GameStatus {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::One => GameStatus::Player1Won,
            Player::Two => GameStatus::Player2Won,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Player1Won => Some(Player::One),
            GameStatus::Player2Won => Some(Player::Two),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    phase: GamePhase,
    status: GameStatus,
}

impl Game {
    pub fn new(board: Board, first: Player) -> Self {
        let mut game = Self {
            board,
            to_move: first,
            phase: GamePhase::MovePlayer,
            status: GameStatus::Ongoing,
        };
        game.check_isolation();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Ongoing
    }

    /// First half of a turn. Only accepted while a move is pending.
    pub fn move_player(&mut self, row: usize, col: usize) -> bool {
        if self.is_over() || self.phase != GamePhase::MovePlayer {
            return false;
        }
        if !self.board.move_player(self.to_move, row, col) {
            return false;
        }
        self.phase = GamePhase::RemoveTile;
        true
    }

    /// Second half of a turn. Hands the turn to the opponent and checks whether
    /// they are isolated.
    pub fn remove_tile(&mut self, row: usize, col: usize) -> bool {
        if self.is_over() || self.phase != GamePhase::RemoveTile {
            return false;
        }
        if !self.board.remove_tile(row, col) {
            return false;
        }
        self.finish_turn();
        true
    }

    /// Plays a whole engine move for the side to move.
    pub fn apply(&mut self, mv: &Move) -> bool {
        if self.is_over() || self.phase != GamePhase::MovePlayer {
            return false;
        }
        if !self.board.apply_move(self.to_move, mv) {
            return false;
        }
        self.finish_turn();
        true
    }

    /// The side to move gives up, e.g. because its engine returned no move.
    pub fn forfeit(&mut self) {
        if !self.is_over() {
            self.status = GameStatus::won_by(self.to_move.other());
        }
    }

    fn finish_turn(&mut self) {
        self.to_move = self.to_move.other();
        self.phase = GamePhase::MovePlayer;
        self.check_isolation();
    }

    fn check_isolation(&mut self) {
        if self.board.is_player_isolated(self.to_move) {
            self.status = GameStatus::won_by(self.to_move.other());
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
