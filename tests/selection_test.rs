//! Adjacency and selection state machine tests.

use tui_match::core::{ClickOutcome, SelectionMachine, SelectionState};
use tui_match::types::{are_adjacent, Board, Coord, MoveAttempt};

#[test]
fn adjacency_is_manhattan_distance_one() {
    for ax in 0..5 {
        for ay in 0..5 {
            for bx in 0..5 {
                for by in 0..5 {
                    let a = Coord::new(ax, ay);
                    let b = Coord::new(bx, by);
                    let manhattan = ax.abs_diff(bx) + ay.abs_diff(by);
                    assert_eq!(are_adjacent(a, b), manhattan == 1, "{a} vs {b}");
                    assert_eq!(are_adjacent(a, b), are_adjacent(b, a));
                    assert_eq!(MoveAttempt::new(a, b).is_some(), manhattan == 1);
                }
            }
        }
    }
}

fn board() -> Board {
    Board::from_rows(vec![vec![1, 2, 0], vec![2, 1, 3]]).unwrap()
}

#[test]
fn full_selection_cycle() {
    let board = board();
    let mut sm = SelectionMachine::new();

    assert_eq!(sm.click(&board, Coord::new(2, 0)), ClickOutcome::Ignored);
    assert_eq!(sm.state(), SelectionState::Idle);

    assert_eq!(
        sm.click(&board, Coord::new(1, 0)),
        ClickOutcome::Selected(Coord::new(1, 0))
    );
    assert_eq!(sm.selected(), Some(Coord::new(1, 0)));

    let outcome = sm.click(&board, Coord::new(1, 1));
    assert_eq!(
        outcome,
        ClickOutcome::Move(MoveAttempt::new(Coord::new(1, 0), Coord::new(1, 1)).unwrap())
    );
    assert!(sm.is_pending());
    assert_eq!(sm.selected(), None);

    assert_eq!(sm.click(&board, Coord::new(0, 0)), ClickOutcome::Locked);
    sm.clear();
    assert!(sm.is_pending());

    sm.complete_cycle();
    assert_eq!(sm.state(), SelectionState::Idle);
}

#[test]
fn adjacent_empty_cell_still_forms_a_move() {
    // Only the first click must land on a tile; the engine judges the swap.
    let board = board();
    let mut sm = SelectionMachine::new();
    sm.click(&board, Coord::new(1, 0));
    assert!(matches!(
        sm.click(&board, Coord::new(2, 0)),
        ClickOutcome::Move(_)
    ));
}

#[test]
fn diagonal_second_click_deselects() {
    let board = board();
    let mut sm = SelectionMachine::new();
    sm.click(&board, Coord::new(0, 0));
    assert_eq!(sm.click(&board, Coord::new(1, 1)), ClickOutcome::Deselected);
    assert_eq!(sm.state(), SelectionState::Idle);
}
