//! Keyboard cursor over the board grid.

use tui_match_types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A highlighted cell, clamped to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    at: Coord,
    columns: usize,
    rows: usize,
}

impl Cursor {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            at: Coord::new(0, 0),
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn position(&self) -> Coord {
        self.at
    }

    /// Jump to `at` (e.g. after a mouse click), clamped to the board.
    pub fn place(&mut self, at: Coord) {
        self.at = Coord::new(at.x.min(self.columns - 1), at.y.min(self.rows - 1));
    }

    /// Track a new board size, keeping the position when it still fits.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns.max(1);
        self.rows = rows.max(1);
        self.place(self.at);
    }

    pub fn step(&mut self, dir: Direction) -> Coord {
        let Coord { x, y } = self.at;
        self.at = match dir {
            Direction::Left => Coord::new(x.saturating_sub(1), y),
            Direction::Right => Coord::new((x + 1).min(self.columns - 1), y),
            Direction::Up => Coord::new(x, y.saturating_sub(1)),
            Direction::Down => Coord::new(x, (y + 1).min(self.rows - 1)),
        };
        self.at
    }
}
