//! Board module - the rectangular tile grid
//!
//! Uses flat row-major storage (`y * width + x`). On the wire a board is a
//! list of rows; decoding goes through [`Board::from_rows`], so a ragged or
//! empty grid never becomes a `Board`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coord, TileKind, EMPTY};

/// Reasons a list of rows is not a valid board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has no rows")]
    NoRows,
    #[error("board rows have no cells")]
    NoColumns,
    #[error("row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Rectangular grid of tile kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileKind>>", into = "Vec<Vec<TileKind>>")]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<TileKind>,
}

impl Board {
    /// Create an empty board (every cell `0`).
    ///
    /// Zero dimensions are clamped to 1 so the rectangle invariant holds.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a board from rows, rejecting empty and ragged grids.
    pub fn from_rows(rows: Vec<Vec<TileKind>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(BoardError::NoRows)?;
        if width == 0 {
            return Err(BoardError::NoColumns);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    actual: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when both boards have the same width and height.
    pub fn same_dimensions(&self, other: &Board) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline(always)]
    fn index(&self, at: Coord) -> Option<usize> {
        if at.x >= self.width || at.y >= self.height {
            return None;
        }
        Some(at.y * self.width + at.x)
    }

    /// Get the tile at `at`. Returns None if out of bounds.
    pub fn get(&self, at: Coord) -> Option<TileKind> {
        self.index(at).map(|i| self.cells[i])
    }

    /// Set the tile at `at`. Returns false if out of bounds.
    pub fn set(&mut self, at: Coord, kind: TileKind) -> bool {
        match self.index(at) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// True when `at` is in bounds and holds a tile.
    pub fn is_occupied(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(kind) if kind != EMPTY)
    }

    /// True when `at` is in bounds and holds no tile.
    pub fn is_vacant(&self, at: Coord) -> bool {
        self.get(at) == Some(EMPTY)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.index(at).is_some()
    }

    /// Exchange two cells. Returns false (and changes nothing) if either is
    /// out of bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(i), Some(j)) => {
                self.cells.swap(i, j);
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, y: usize) -> Option<&[TileKind]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.cells.chunks(self.width)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Non-empty cells with their coordinates, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, TileKind)> + '_ {
        self.coords()
            .zip(self.cells.iter().copied())
            .filter(|&(_, kind)| kind != EMPTY)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&kind| kind != EMPTY).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<TileKind>> {
        self.rows().map(<[TileKind]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<TileKind>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<TileKind>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<TileKind>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_grid() {
        let err = Board::from_rows(vec![vec![1, 2, 3], vec![1, 2]]).unwrap_err();
        assert_eq!(
            err,
            BoardError::Ragged {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(Board::from_rows(vec![]).unwrap_err(), BoardError::NoRows);
        assert_eq!(
            Board::from_rows(vec![vec![]]).unwrap_err(),
            BoardError::NoColumns
        );
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut board = Board::new(3, 2);
        assert!(board.set(Coord::new(2, 1), 4));
        assert_eq!(board.get(Coord::new(2, 1)), Some(4));
        assert!(!board.set(Coord::new(3, 0), 1));
        assert_eq!(board.get(Coord::new(0, 2)), None);
        assert!(board.is_vacant(Coord::new(0, 0)));
        assert!(board.is_occupied(Coord::new(2, 1)));
        assert!(!board.is_occupied(Coord::new(9, 9)));
    }

    #[test]
    fn swap_exchanges_cells() {
        let mut board = Board::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert!(board.swap(Coord::new(0, 0), Coord::new(1, 1)));
        assert_eq!(board.to_rows(), vec![vec![4, 2], vec![3, 1]]);
        assert!(!board.swap(Coord::new(0, 0), Coord::new(2, 0)));
    }

    #[test]
    fn tiles_skip_empty_cells() {
        let board = Board::from_rows(vec![vec![0, 2], vec![3, 0]]).unwrap();
        let tiles: Vec<_> = board.tiles().collect();
        assert_eq!(tiles, vec![(Coord::new(1, 0), 2), (Coord::new(0, 1), 3)]);
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn serde_uses_row_lists_and_validates() {
        let board = Board::from_rows(vec![vec![1, 0], vec![2, 3]]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[1,0],[2,3]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        assert!(serde_json::from_str::<Board>("[[1,2],[3]]").is_err());
    }
}
