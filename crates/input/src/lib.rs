//! Terminal input for the puzzle board.
//!
//! This crate is independent of any game state. It maps `crossterm` events
//! into [`InputAction`]s and keeps the keyboard cursor used as a stand-in for
//! the mouse.

pub mod cursor;
pub mod map;

pub use tui_match_types as types;

pub use cursor::{Cursor, Direction};
pub use map::{map_event, map_key_event, should_quit, InputAction};
