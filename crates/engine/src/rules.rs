//! Match resolution rules for the local engine.
//!
//! - A run is 3+ equal non-empty tiles in a row or column.
//! - A swap is legal only if it creates at least one run.
//! - Each cascade step scores one point per distinct matched cell, clears the
//!   matched cells, drops each column's tiles to the bottom and refills the
//!   top with random kinds. Steps repeat until the board has no run.

use std::collections::BTreeSet;

use tui_match_types::{Board, Coord, GameState, MoveAttempt, EMPTY};

use crate::rng::SimpleRng;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Fill a `width x height` board with kinds `1..=kinds`, avoiding any
/// horizontal or vertical triple.
///
/// `kinds` below 3 is raised to 3 so a non-matching kind always exists.
pub fn generate(width: usize, height: usize, kinds: u8, rng: &mut SimpleRng) -> Board {
    let kinds = kinds.max(3);
    let mut board = Board::new(width, height);

    for at in board.coords().collect::<Vec<_>>() {
        loop {
            let kind = rng.next_kind(kinds);
            let left = at.x >= 2
                && board.get(Coord::new(at.x - 1, at.y)) == Some(kind)
                && board.get(Coord::new(at.x - 2, at.y)) == Some(kind);
            let up = at.y >= 2
                && board.get(Coord::new(at.x, at.y - 1)) == Some(kind)
                && board.get(Coord::new(at.x, at.y - 2)) == Some(kind);
            if !left && !up {
                board.set(at, kind);
                break;
            }
        }
    }

    board
}

/// All runs on the board, rows first then columns. A cell in both a
/// horizontal and a vertical run appears in both groups.
pub fn find_runs(board: &Board) -> Vec<Vec<Coord>> {
    let mut runs = Vec::new();

    for y in 0..board.height() {
        collect_runs((0..board.width()).map(|x| Coord::new(x, y)), board, &mut runs);
    }
    for x in 0..board.width() {
        collect_runs((0..board.height()).map(|y| Coord::new(x, y)), board, &mut runs);
    }

    runs
}

fn collect_runs(line: impl Iterator<Item = Coord>, board: &Board, out: &mut Vec<Vec<Coord>>) {
    let mut current: Vec<Coord> = Vec::new();
    let mut current_kind = EMPTY;

    for at in line {
        let kind = board.get(at).unwrap_or(EMPTY);
        if kind != EMPTY && kind == current_kind {
            current.push(at);
            continue;
        }
        if current.len() >= MIN_RUN {
            out.push(std::mem::take(&mut current));
        }
        current.clear();
        current_kind = kind;
        if kind != EMPTY {
            current.push(at);
        }
    }

    if current.len() >= MIN_RUN {
        out.push(current);
    }
}

/// Drop tiles to the bottom of each column and refill the gaps at the top.
pub fn collapse(board: &mut Board, kinds: u8, rng: &mut SimpleRng) {
    for x in 0..board.width() {
        let mut write_y = board.height();
        for y in (0..board.height()).rev() {
            let at = Coord::new(x, y);
            let kind = board.get(at).unwrap_or(EMPTY);
            if kind == EMPTY {
                continue;
            }
            write_y -= 1;
            if write_y != y {
                board.set(Coord::new(x, write_y), kind);
                board.set(at, EMPTY);
            }
        }
        for y in 0..write_y {
            board.set(Coord::new(x, y), rng.next_kind(kinds));
        }
    }
}

/// Resolve a swap against `state`.
///
/// Returns `state` unchanged when the coordinates are out of bounds or the
/// swap creates no run.
pub fn resolve(
    state: GameState,
    attempt: MoveAttempt,
    kinds: u8,
    rng: &mut SimpleRng,
) -> GameState {
    let GameState { mut board, score } = state;
    if !board.is_occupied(attempt.from) || !board.is_occupied(attempt.to) {
        return GameState::new(board, score);
    }

    board.swap(attempt.from, attempt.to);
    if find_runs(&board).is_empty() {
        board.swap(attempt.from, attempt.to);
        return GameState::new(board, score);
    }

    let mut total = score;
    loop {
        let matched: BTreeSet<Coord> = find_runs(&board).into_iter().flatten().collect();
        if matched.is_empty() {
            break;
        }
        total = total.saturating_add(matched.len() as u32);
        for &at in &matched {
            board.set(at, EMPTY);
        }
        collapse(&mut board, kinds, rng);
    }

    GameState::new(board, total)
}
