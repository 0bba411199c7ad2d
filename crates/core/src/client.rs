//! Board engine contract and the client-side wrapper around it.
//!
//! The engine is authoritative and external: it generates boards and resolves
//! moves. The client never simulates matches. It only refuses to send
//! non-adjacent moves and refuses to accept responses that cannot describe the
//! submitted board.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use tui_match_types::{BoardError, Coord, GameState, MoveAttempt, MoveRequest};

use crate::session::Session;

/// Why an engine response was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("board is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
    #[error("score went backwards from {before} to {after}")]
    ScoreRegressed { before: u32, after: u32 },
    #[error("response seq {actual} does not answer request seq {expected}")]
    SeqMismatch { expected: u64, actual: u64 },
    #[error("undecodable response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("tiles {from} and {to} are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },
    #[error("engine transport failed: {0}")]
    Transport(#[from] std::io::Error),
    #[error("engine did not answer within {0} ms")]
    Timeout(u64),
    #[error("engine error ({code}): {message}")]
    Engine { code: String, message: String },
    #[error("malformed engine response: {0}")]
    Malformed(#[from] ResponseError),
}

/// The external rules engine's two asynchronous operations.
#[async_trait]
pub trait BoardEngine: Send + Sync {
    /// Produce the initial authoritative state.
    async fn generate_board(&self) -> Result<GameState, EngineError>;

    /// Resolve a move. Illegal moves return the submitted board and score.
    async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError>;
}

#[async_trait]
impl<T: BoardEngine + ?Sized> BoardEngine for Box<T> {
    async fn generate_board(&self) -> Result<GameState, EngineError> {
        (**self).generate_board().await
    }

    async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError> {
        (**self).move_tile(request).await
    }
}

#[async_trait]
impl<T: BoardEngine + ?Sized> BoardEngine for Arc<T> {
    async fn generate_board(&self) -> Result<GameState, EngineError> {
        (**self).generate_board().await
    }

    async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError> {
        (**self).move_tile(request).await
    }
}

/// Thin wrapper the orchestrator talks to instead of the raw engine.
pub struct EngineClient<E> {
    engine: E,
}

impl<E: BoardEngine> EngineClient<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Start a session from the engine's initial board.
    pub async fn generate_board(&self) -> Result<Session, EngineError> {
        let state = self.engine.generate_board().await?;
        debug!(
            width = state.board.width(),
            height = state.board.height(),
            score = state.score,
            "engine generated board"
        );
        Ok(Session::new(state))
    }

    /// Submit `attempt` against the session's committed state.
    ///
    /// Non-adjacent attempts never reach the engine. The returned state is
    /// validated against the submitted one but not committed.
    pub async fn move_tile(
        &self,
        session: &Session,
        attempt: MoveAttempt,
    ) -> Result<GameState, EngineError> {
        if !attempt.from.is_adjacent(attempt.to) {
            return Err(EngineError::NotAdjacent {
                from: attempt.from,
                to: attempt.to,
            });
        }

        let request = session.request(attempt);
        let next = self.engine.move_tile(request).await?;
        validate_response(session.state(), &next).map_err(|err| {
            warn!(%attempt, %err, "rejecting engine response");
            err
        })?;
        Ok(next)
    }
}

/// Check that `next` can replace `current`: same dimensions, no score drop.
pub fn validate_response(current: &GameState, next: &GameState) -> Result<(), ResponseError> {
    if !next.board.same_dimensions(&current.board) {
        return Err(ResponseError::DimensionMismatch {
            expected_width: current.board.width(),
            expected_height: current.board.height(),
            actual_width: next.board.width(),
            actual_height: next.board.height(),
        });
    }
    if next.score < current.score {
        return Err(ResponseError::ScoreRegressed {
            before: current.score,
            after: next.score,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use tui_match_types::Board;

    struct Echo {
        calls: AtomicUsize,
        reply: Option<GameState>,
    }

    #[async_trait]
    impl BoardEngine for Echo {
        async fn generate_board(&self) -> Result<GameState, EngineError> {
            Ok(GameState::new(
                Board::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap(),
                0,
            ))
        }

        async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone().unwrap_or_else(|| request.unchanged()))
        }
    }

    fn attempt(a: (usize, usize), b: (usize, usize)) -> MoveAttempt {
        MoveAttempt {
            from: Coord::new(a.0, a.1),
            to: Coord::new(b.0, b.1),
        }
    }

    #[tokio::test]
    async fn non_adjacent_attempt_never_reaches_engine() {
        let client = EngineClient::new(Echo {
            calls: AtomicUsize::new(0),
            reply: None,
        });
        let session = client.generate_board().await.unwrap();

        let err = client
            .move_tile(&session, attempt((0, 0), (1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotAdjacent { .. }));
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 0);

        client
            .move_tile(&session, attempt((0, 0), (1, 0)))
            .await
            .unwrap();
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_malformed() {
        let client = EngineClient::new(Echo {
            calls: AtomicUsize::new(0),
            reply: Some(GameState::new(Board::new(3, 2), 0)),
        });
        let session = client.generate_board().await.unwrap();
        let err = client
            .move_tile(&session, attempt((0, 0), (0, 1)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Malformed(ResponseError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn score_regression_is_rejected() {
        let board = Board::from_rows(vec![vec![1]]).unwrap();
        let current = GameState::new(board.clone(), 10);
        let next = GameState::new(board, 9);
        assert_eq!(
            validate_response(&current, &next),
            Err(ResponseError::ScoreRegressed {
                before: 10,
                after: 9
            })
        );
    }
}
