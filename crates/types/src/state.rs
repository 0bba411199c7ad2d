//! Wire shapes of the board engine contract.

use serde::{Deserialize, Serialize};

use crate::{Board, Coord, MoveAttempt};

/// Authoritative `{board, score}` pair produced by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub score: u32,
}

impl GameState {
    pub fn new(board: Board, score: u32) -> Self {
        Self { board, score }
    }
}

/// `moveTile` request: the attempted swap plus the client's view of the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    pub board: Board,
    pub score: u32,
}

impl MoveRequest {
    pub fn new(attempt: MoveAttempt, state: &GameState) -> Self {
        Self {
            x1: attempt.from.x,
            y1: attempt.from.y,
            x2: attempt.to.x,
            y2: attempt.to.y,
            board: state.board.clone(),
            score: state.score,
        }
    }

    pub fn first(&self) -> Coord {
        Coord::new(self.x1, self.y1)
    }

    pub fn second(&self) -> Coord {
        Coord::new(self.x2, self.y2)
    }

    /// The attempted swap, if the coordinates are adjacent.
    pub fn attempt(&self) -> Option<MoveAttempt> {
        MoveAttempt::new(self.first(), self.second())
    }

    /// The submitted state, unchanged. Engines return this for illegal moves.
    pub fn unchanged(self) -> GameState {
        GameState {
            board: self.board,
            score: self.score,
        }
    }
}
