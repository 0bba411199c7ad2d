//! Terminal rendering for the puzzle board.
//!
//! Rendering happens in two steps:
//!
//! - [`layout::Renderer`] turns `(board, score, selection)` into a [`Frame`]:
//!   the complete set of tile handles for one render, keyed by coordinate.
//!   It is a pure function and is rebuilt from scratch on every call.
//! - [`board_view::BoardView`] paints a [`Scene`] (a frame's tiles as sprites,
//!   possibly mid-animation) into a [`FrameBuffer`], which
//!   [`renderer::TerminalRenderer`] flushes to the terminal.
//!
//! Goals:
//! - Keep the interaction logic independent from terminal I/O
//! - Keep tile placement deterministic so hit-testing and animation agree
//! - Allow precise control over tile aspect (default 4x2 cells per tile)

pub mod board_view;
pub mod fb;
pub mod layout;
pub mod renderer;

pub use tui_match_types as types;

pub use board_view::{tile_color, BoardView, Scene, Sprite, SpriteEffect, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use layout::{Frame, Renderer, TileHandle, TilePitch};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
