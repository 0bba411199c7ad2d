//! Selection state machine.
//!
//! Turns coordinate clicks into selection changes or move attempts:
//!
//! ```text
//! Idle        + click on tile        -> Selected(at)
//! Idle        + click on empty cell  -> Idle
//! Selected(a) + click b, adjacent    -> Pending (selection cleared, move starts)
//! Selected(a) + click b, otherwise   -> Idle (deselect, no engine call)
//! Selected(a) + click off the board  -> Idle (deselect, no engine call)
//! Pending     + click                -> Pending (click ignored)
//! Pending     + cycle complete       -> Idle
//! ```

use tui_match_types::{Board, Coord, MoveAttempt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(Coord),
    /// A move cycle is in flight; input is locked.
    Pending,
}

/// What a click did to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A tile became selected; redraw with the highlight.
    Selected(Coord),
    /// Nothing happened (empty or out-of-bounds cell while idle).
    Ignored,
    /// The previous selection was dropped; redraw without highlight.
    Deselected,
    /// An adjacent pair was clicked; the machine is now Pending.
    Move(MoveAttempt),
    /// A move cycle is already in flight; the click was discarded.
    Locked,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The highlighted coordinate, if any.
    pub fn selected(&self) -> Option<Coord> {
        match self.state {
            SelectionState::Selected(at) => Some(at),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == SelectionState::Pending
    }

    pub fn click(&mut self, board: &Board, at: Coord) -> ClickOutcome {
        match self.state {
            SelectionState::Pending => ClickOutcome::Locked,
            SelectionState::Idle => {
                if board.is_occupied(at) {
                    self.state = SelectionState::Selected(at);
                    ClickOutcome::Selected(at)
                } else {
                    ClickOutcome::Ignored
                }
            }
            SelectionState::Selected(first) => match MoveAttempt::new(first, at) {
                Some(attempt) if board.contains(at) => {
                    self.state = SelectionState::Pending;
                    ClickOutcome::Move(attempt)
                }
                _ => {
                    self.state = SelectionState::Idle;
                    ClickOutcome::Deselected
                }
            },
        }
    }

    /// Leave Pending once the move cycle has fully completed (accepted,
    /// rejected or failed).
    pub fn complete_cycle(&mut self) {
        if self.state == SelectionState::Pending {
            self.state = SelectionState::Idle;
        }
    }

    /// Drop any selection. Has no effect while Pending.
    pub fn clear(&mut self) {
        if let SelectionState::Selected(_) = self.state {
            self.state = SelectionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::from_rows(vec![vec![1, 2, 0], vec![2, 1, 3]]).unwrap()
    }

    #[test]
    fn idle_click_on_empty_cell_is_ignored() {
        let mut m = SelectionMachine::new();
        assert_eq!(m.click(&board(), Coord::new(2, 0)), ClickOutcome::Ignored);
        assert_eq!(m.click(&board(), Coord::new(7, 7)), ClickOutcome::Ignored);
        assert_eq!(m.state(), SelectionState::Idle);
    }

    #[test]
    fn non_adjacent_second_click_deselects() {
        let mut m = SelectionMachine::new();
        m.click(&board(), Coord::new(0, 0));
        assert_eq!(m.click(&board(), Coord::new(1, 1)), ClickOutcome::Deselected);
        assert_eq!(m.selected(), None);

        // Clicking the selected tile again also deselects.
        m.click(&board(), Coord::new(0, 0));
        assert_eq!(m.click(&board(), Coord::new(0, 0)), ClickOutcome::Deselected);
    }

    #[test]
    fn adjacent_click_off_the_board_deselects() {
        let mut m = SelectionMachine::new();
        m.click(&board(), Coord::new(2, 1));
        assert_eq!(m.click(&board(), Coord::new(3, 1)), ClickOutcome::Deselected);
        assert_eq!(m.state(), SelectionState::Idle);

        m.click(&board(), Coord::new(0, 1));
        assert_eq!(m.click(&board(), Coord::new(0, 2)), ClickOutcome::Deselected);
        assert!(!m.is_pending());
    }

    #[test]
    fn pending_locks_until_cycle_completes() {
        let mut m = SelectionMachine::new();
        m.click(&board(), Coord::new(0, 0));
        assert!(matches!(
            m.click(&board(), Coord::new(0, 1)),
            ClickOutcome::Move(_)
        ));
        assert_eq!(m.selected(), None);
        assert_eq!(m.click(&board(), Coord::new(1, 0)), ClickOutcome::Locked);
        assert!(m.is_pending());

        m.clear();
        assert!(m.is_pending());

        m.complete_cycle();
        assert_eq!(m.state(), SelectionState::Idle);
    }
}
