//! Core interaction logic - pure, deterministic, and testable
//!
//! This crate holds everything about a move cycle that does not involve time
//! or a terminal:
//!
//! - [`session`]: the authoritative board and score between move cycles
//! - [`selection`]: the Idle / Selected / Pending click state machine
//! - [`diff`]: old/new board comparison (removal set, fall pairings)
//! - [`client`]: the [`BoardEngine`] contract and the [`EngineClient`] wrapper
//!   that pre-checks adjacency and validates engine responses
//!
//! No game rules live here. Matching, removal, cascades and scoring belong to
//! the board engine; the client only compares the boards it gets back.
//!
//! # Example
//!
//! ```
//! use tui_match_core::{ClickOutcome, SelectionMachine};
//! use tui_match_types::{Board, Coord};
//!
//! let board = Board::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap();
//! let mut selection = SelectionMachine::new();
//!
//! assert_eq!(selection.click(&board, Coord::new(0, 0)), ClickOutcome::Selected(Coord::new(0, 0)));
//! match selection.click(&board, Coord::new(1, 0)) {
//!     ClickOutcome::Move(attempt) => assert_eq!(attempt.to, Coord::new(1, 0)),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(selection.is_pending());
//! ```

pub mod client;
pub mod diff;
pub mod selection;
pub mod session;

pub use tui_match_types as types;

pub use client::{validate_response, BoardEngine, EngineClient, EngineError, ResponseError};
pub use diff::{fall_pairings, removal_set, CycleDiff, FallMove};
pub use selection::{ClickOutcome, SelectionMachine, SelectionState};
pub use session::Session;
