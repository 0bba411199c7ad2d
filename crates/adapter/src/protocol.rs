//! Wire messages for the remote engine protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

use tui_match_types::{Board, GameState, MoveRequest};

/// Client -> server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    GenerateBoard {
        seq: u64,
    },
    MoveTile {
        seq: u64,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        board: Board,
        score: u32,
    },
}

impl Request {
    pub fn move_tile(seq: u64, request: MoveRequest) -> Self {
        Self::MoveTile {
            seq,
            x1: request.x1,
            y1: request.y1,
            x2: request.x2,
            y2: request.y2,
            board: request.board,
            score: request.score,
        }
    }

    pub fn seq(&self) -> u64 {
        match self {
            Self::GenerateBoard { seq } | Self::MoveTile { seq, .. } => *seq,
        }
    }
}

/// Server -> client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    State {
        seq: u64,
        board: Board,
        score: u32,
    },
    Error {
        seq: u64,
        code: ErrorCode,
        message: String,
    },
}

impl Response {
    pub fn state(seq: u64, state: GameState) -> Self {
        Self::State {
            seq,
            board: state.board,
            score: state.score,
        }
    }

    pub fn error(seq: u64, code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            seq,
            code,
            message: message.into(),
        }
    }

    pub fn seq(&self) -> u64 {
        match self {
            Self::State { seq, .. } | Self::Error { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request line could not be parsed.
    InvalidRequest,
    /// The engine failed to produce a state.
    EngineFailed,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::EngineFailed => "engine_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
