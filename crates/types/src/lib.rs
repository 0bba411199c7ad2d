//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the client.
//! They are plain data with serde support so the same values travel between
//! the interaction layer, the renderer and the board engine wire protocol.
//!
//! # Board Dimensions
//!
//! The board is a rectangular grid fixed for the lifetime of a session:
//!
//! - **Width**: 8 columns by default (indexed 0-7, left to right)
//! - **Height**: 8 rows by default (indexed 0-7, top to bottom)
//! - **Cells**: tile-kind identifiers, `0` meaning empty
//!
//! # Animation Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SWAP_MS` | 250 | Timed swap transition before the engine call |
//! | `REMOVE_MS` | 300 | Removal animation per tile |
//! | `FALL_MS` | 300 | Fall animation per tile |
//! | `APPEAR_MS` | 200 | Entrance animation on the settled board |
//! | `FRAME_MS` | 16 | Render tick (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_match_types::{Board, Coord, MoveAttempt};
//!
//! let board = Board::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap();
//! assert_eq!(board.get(Coord::new(1, 0)), Some(2));
//!
//! // Only orthogonal neighbours form a move.
//! assert!(MoveAttempt::new(Coord::new(0, 0), Coord::new(1, 0)).is_some());
//! assert!(MoveAttempt::new(Coord::new(0, 0), Coord::new(1, 1)).is_none());
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod board;
pub mod state;

pub use board::{Board, BoardError};
pub use state::{GameState, MoveRequest};

/// Tile-kind identifier stored in a board cell.
pub type TileKind = u8;

/// Cell value meaning "no tile".
pub const EMPTY: TileKind = 0;

/// Default board width in cells (8 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 8;

/// Default board height in cells (8 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 8;

/// Default number of distinct tile kinds (1..=5)
pub const DEFAULT_TILE_KINDS: u8 = 5;

/// Swap transition duration (250ms)
pub const SWAP_MS: u64 = 250;

/// Removal animation duration (300ms)
pub const REMOVE_MS: u64 = 300;

/// Fall animation duration (300ms)
pub const FALL_MS: u64 = 300;

/// Entrance animation duration (200ms)
pub const APPEAR_MS: u64 = 200;

/// Render tick interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Tile width in terminal columns.
pub const TILE_WIDTH: u16 = 4;

/// Tile height in terminal rows.
pub const TILE_HEIGHT: u16 = 2;

/// Horizontal gap between tiles in terminal columns.
pub const TILE_GAP_X: u16 = 1;

/// Vertical gap between tiles in terminal rows.
pub const TILE_GAP_Y: u16 = 0;

/// A board coordinate: `x` is the column, `y` is the row (top to bottom).
///
/// Coordinates order row-major: by `y`, then `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two coordinates are orthogonal neighbours.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Adjacency holds iff the Manhattan distance equals 1.
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    a.is_adjacent(b)
}

/// A pair of adjacent coordinates the player wants to swap.
///
/// Construction enforces adjacency, so any `MoveAttempt` in hand is valid to
/// submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAttempt {
    pub from: Coord,
    pub to: Coord,
}

impl MoveAttempt {
    pub fn new(from: Coord, to: Coord) -> Option<Self> {
        are_adjacent(from, to).then_some(Self { from, to })
    }
}

impl fmt::Display for MoveAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.from, self.to)
    }
}
