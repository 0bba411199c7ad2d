//! Old/new board comparison for the removal and fall phases.
//!
//! Board snapshots carry no tile identity, so both phases are inferred from
//! cell values alone. Pairings for duplicate kinds in one column follow
//! top-to-bottom scan order and can attribute a fall to the wrong physical
//! tile; that heuristic is kept as is.

use tui_match_types::{Board, Coord, TileKind, EMPTY};

/// A surviving tile paired with its landing slot in the same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallMove {
    pub from: Coord,
    pub to: Coord,
    pub kind: TileKind,
}

impl FallMove {
    pub fn distance(&self) -> usize {
        self.to.y - self.from.y
    }
}

/// Coordinates holding a tile before the move and nothing after it.
///
/// Row-major order. Boards of different dimensions only compare their
/// overlapping cells.
pub fn removal_set(old: &Board, new: &Board) -> Vec<Coord> {
    old.tiles()
        .filter(|&(at, _)| new.get(at) == Some(EMPTY))
        .map(|(at, _)| at)
        .collect()
}

/// Pair each pre-move tile with the first slot below it (same column) where
/// the post-move board shows the same kind and the pre-move board was empty.
///
/// Tiles with no such slot are treated as staying put. Scan is row-major over
/// the pre-move board; each tile stops at its first match, and two tiles may
/// name the same landing slot.
pub fn fall_pairings(old: &Board, new: &Board) -> Vec<FallMove> {
    let mut moves = Vec::new();
    let height = old.height().min(new.height());

    for (from, kind) in old.tiles() {
        let landing = (from.y + 1..height)
            .map(|ny| Coord::new(from.x, ny))
            .find(|&slot| new.get(slot) == Some(kind) && old.get(slot) == Some(EMPTY));
        if let Some(to) = landing {
            moves.push(FallMove { from, to, kind });
        }
    }

    moves
}

/// Everything the orchestrator needs to animate one resolved move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleDiff {
    pub removed: Vec<Coord>,
    pub falls: Vec<FallMove>,
}

impl CycleDiff {
    pub fn between(old: &Board, new: &Board) -> Self {
        Self {
            removed: removal_set(old, new),
            falls: fall_pairings(old, new),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.falls.is_empty()
    }

    /// The board to show during the fall phase: the pre-move board with the
    /// removal set cleared, except cells whose tile still has a fall to play.
    pub fn fall_stage_board(&self, old: &Board) -> Board {
        let mut board = old.clone();
        for &at in &self.removed {
            if !self.falls.iter().any(|m| m.from == at) {
                board.set(at, EMPTY);
            }
        }
        board
    }
}
