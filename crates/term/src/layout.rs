//! Renderer: (board, score, selection) -> [`Frame`].
//!
//! A frame is the full visual tile set for one render call: one
//! [`TileHandle`] per non-empty cell, placed on a fixed-pitch grid and keyed by
//! its board coordinate. Every call builds a fresh frame; nothing carries over
//! from the previous one. Animation phases find tiles through
//! [`Frame::handle`] instead of searching the screen.
//!
//! Positions are in terminal cells relative to the board's top-left corner
//! (inside the border).

use std::collections::BTreeMap;

use tui_match_types::{
    Board, Coord, TileKind, TILE_GAP_X, TILE_GAP_Y, TILE_HEIGHT, TILE_WIDTH,
};

/// Tile size plus inter-tile gap, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePitch {
    pub tile_w: u16,
    pub tile_h: u16,
    pub gap_x: u16,
    pub gap_y: u16,
}

impl Default for TilePitch {
    fn default() -> Self {
        Self {
            tile_w: TILE_WIDTH,
            tile_h: TILE_HEIGHT,
            gap_x: TILE_GAP_X,
            gap_y: TILE_GAP_Y,
        }
    }
}

impl TilePitch {
    pub fn step_x(&self) -> u16 {
        self.tile_w + self.gap_x
    }

    pub fn step_y(&self) -> u16 {
        self.tile_h + self.gap_y
    }

    /// Top-left cell of the tile at `at`.
    pub fn origin(&self, at: Coord) -> (u16, u16) {
        let cell = |n: usize, step: u16| {
            u16::try_from(n).map_or(u16::MAX, |n| n.saturating_mul(step))
        };
        (cell(at.x, self.step_x()), cell(at.y, self.step_y()))
    }

    /// Size of a `columns x rows` board in cells (no trailing gap).
    pub fn extent(&self, columns: usize, rows: usize) -> (u16, u16) {
        let span = |n: usize, step: u16, size: u16| {
            if n == 0 {
                0
            } else {
                (n as u16 - 1).saturating_mul(step).saturating_add(size)
            }
        };
        (
            span(columns, self.step_x(), self.tile_w),
            span(rows, self.step_y(), self.tile_h),
        )
    }
}

/// One rendered tile, tagged with the board coordinate it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHandle {
    pub coord: Coord,
    pub kind: TileKind,
    pub x: u16,
    pub y: u16,
    pub selected: bool,
    /// Play the entrance animation when this frame is presented.
    pub appear: bool,
}

/// The per-frame coordinate -> tile handle map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    columns: usize,
    rows: usize,
    score: u32,
    pitch: TilePitch,
    tiles: BTreeMap<Coord, TileHandle>,
}

impl Frame {
    /// A frame with no tiles, e.g. before the first board arrives.
    pub fn empty(columns: usize, rows: usize, pitch: TilePitch) -> Self {
        Self {
            columns,
            rows,
            score: 0,
            pitch,
            tiles: BTreeMap::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pitch(&self) -> TilePitch {
        self.pitch
    }

    /// Board size in terminal cells.
    pub fn extent(&self) -> (u16, u16) {
        self.pitch.extent(self.columns, self.rows)
    }

    pub fn handle(&self, at: Coord) -> Option<&TileHandle> {
        self.tiles.get(&at)
    }

    /// Handles in row-major coordinate order.
    pub fn handles(&self) -> impl Iterator<Item = &TileHandle> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile under board-relative cell `(x, y)`. Gaps and empty cells hit
    /// nothing.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Coord> {
        self.handles()
            .find(|h| {
                x >= h.x && x < h.x + self.pitch.tile_w && y >= h.y && y < h.y + self.pitch.tile_h
            })
            .map(|h| h.coord)
    }
}

/// Stateless board renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderer {
    pitch: TilePitch,
}

impl Renderer {
    pub fn new(pitch: TilePitch) -> Self {
        Self { pitch }
    }

    pub fn pitch(&self) -> TilePitch {
        self.pitch
    }

    /// Rebuild the whole tile set for `board`.
    ///
    /// With `appear` set, every tile is flagged for the entrance animation;
    /// board snapshots cannot tell new tiles from settled ones.
    pub fn render(
        &self,
        board: &Board,
        score: u32,
        selection: Option<Coord>,
        appear: bool,
    ) -> Frame {
        let tiles = board
            .tiles()
            .map(|(coord, kind)| {
                let (x, y) = self.pitch.origin(coord);
                let handle = TileHandle {
                    coord,
                    kind,
                    x,
                    y,
                    selected: selection == Some(coord),
                    appear,
                };
                (coord, handle)
            })
            .collect();

        Frame {
            columns: board.width(),
            rows: board.height(),
            score,
            pitch: self.pitch,
            tiles,
        }
    }
}
