//! Session state: the last committed authoritative board and score.

use tui_match_types::{Board, GameState, MoveAttempt, MoveRequest};

/// Single source of truth between move cycles.
///
/// Created from the engine's `generateBoard` result and only ever replaced
/// wholesale by [`Session::commit`] at the end of an accepted move cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: GameState,
    moves_committed: u32,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            moves_committed: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Number of accepted move cycles committed so far.
    pub fn moves_committed(&self) -> u32 {
        self.moves_committed
    }

    /// Build the `moveTile` request for `attempt` from the committed state.
    pub fn request(&self, attempt: MoveAttempt) -> MoveRequest {
        MoveRequest::new(attempt, &self.state)
    }

    /// Replace the committed board and score.
    ///
    /// Callers validate `next` first; dimensions and score monotonicity are
    /// only asserted in debug builds.
    pub fn commit(&mut self, next: GameState) {
        debug_assert!(next.board.same_dimensions(&self.state.board));
        debug_assert!(next.score >= self.state.score);
        self.state = next;
        self.moves_committed = self.moves_committed.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_match_types::Coord;

    fn state(rows: Vec<Vec<u8>>, score: u32) -> GameState {
        GameState::new(Board::from_rows(rows).unwrap(), score)
    }

    #[test]
    fn commit_replaces_board_and_score() {
        let mut session = Session::new(state(vec![vec![1, 2], vec![2, 1]], 0));
        session.commit(state(vec![vec![3, 3], vec![1, 1]], 3));
        assert_eq!(session.score(), 3);
        assert_eq!(session.board().to_rows(), vec![vec![3, 3], vec![1, 1]]);
        assert_eq!(session.moves_committed(), 1);
    }

    #[test]
    fn request_carries_committed_state() {
        let session = Session::new(state(vec![vec![1, 2], vec![2, 1]], 5));
        let attempt = MoveAttempt::new(Coord::new(0, 1), Coord::new(0, 0)).unwrap();
        let req = session.request(attempt);
        assert_eq!((req.x1, req.y1, req.x2, req.y2), (0, 1, 0, 0));
        assert_eq!(req.score, 5);
        assert_eq!(&req.board, session.board());
    }
}
