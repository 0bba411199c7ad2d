//! Local board engine - the authoritative rules collaborator, in process
//!
//! The interaction layer treats the engine as external: it only sees the
//! [`BoardEngine`] contract. This crate provides an implementation that runs in
//! the same process (or behind the TCP adapter via the `match-engine` binary):
//!
//! - [`rules`]: run detection, cascade resolution and column refill
//! - [`rng`]: seeded LCG so a seed reproduces the same game
//!
//! # Example
//!
//! ```
//! use tui_match_core::BoardEngine;
//! use tui_match_engine::{EngineConfig, LocalEngine};
//!
//! # tokio_test::block_on(async {
//! let engine = LocalEngine::new(EngineConfig::default(), 42);
//! let state = engine.generate_board().await.unwrap();
//! assert_eq!(state.board.width(), 8);
//! assert_eq!(state.score, 0);
//! # });
//! ```

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use tui_match_core::{BoardEngine, EngineError};
use tui_match_types::{
    GameState, MoveRequest, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_TILE_KINDS,
};

pub mod rng;
pub mod rules;

pub use rng::SimpleRng;

/// Board shape and tile variety for generated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub tile_kinds: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            tile_kinds: DEFAULT_TILE_KINDS,
        }
    }
}

/// In-process rules engine.
pub struct LocalEngine {
    config: EngineConfig,
    rng: Mutex<SimpleRng>,
}

impl LocalEngine {
    pub fn new(config: EngineConfig, seed: u32) -> Self {
        Self {
            config,
            rng: Mutex::new(SimpleRng::new(seed)),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    fn rng(&self) -> MutexGuard<'_, SimpleRng> {
        // A panic mid-draw leaves the RNG in a valid state.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BoardEngine for LocalEngine {
    async fn generate_board(&self) -> Result<GameState, EngineError> {
        let board = rules::generate(
            self.config.width,
            self.config.height,
            self.config.tile_kinds,
            &mut self.rng(),
        );
        Ok(GameState::new(board, 0))
    }

    async fn move_tile(&self, request: MoveRequest) -> Result<GameState, EngineError> {
        let Some(attempt) = request.attempt() else {
            debug!(
                x1 = request.x1,
                y1 = request.y1,
                x2 = request.x2,
                y2 = request.y2,
                "non-adjacent move returned unchanged"
            );
            return Ok(request.unchanged());
        };

        let before = request.score;
        let state = rules::resolve(
            request.unchanged(),
            attempt,
            self.config.tile_kinds,
            &mut self.rng(),
        );
        debug!(%attempt, gained = state.score - before, "move resolved");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_match_types::{Board, Coord, MoveAttempt};

    #[tokio::test]
    async fn illegal_move_returns_identical_state() {
        let engine = LocalEngine::new(EngineConfig::default(), 5);
        let state = GameState::new(Board::from_rows(vec![vec![1, 2], vec![2, 1]]).unwrap(), 3);
        let attempt = MoveAttempt::new(Coord::new(0, 0), Coord::new(0, 1)).unwrap();

        let out = engine
            .move_tile(MoveRequest::new(attempt, &state))
            .await
            .unwrap();
        assert_eq!(out, state);
    }

    #[tokio::test]
    async fn non_adjacent_request_is_echoed() {
        let engine = LocalEngine::new(EngineConfig::default(), 5);
        let state = engine.generate_board().await.unwrap();
        let mut req = MoveRequest::new(
            MoveAttempt::new(Coord::new(0, 0), Coord::new(1, 0)).unwrap(),
            &state,
        );
        req.x2 = 3;

        let out = engine.move_tile(req).await.unwrap();
        assert_eq!(out, state);
    }

    #[tokio::test]
    async fn same_seed_generates_same_board() {
        let a = LocalEngine::new(EngineConfig::default(), 11);
        let b = LocalEngine::new(EngineConfig::default(), 11);
        assert_eq!(
            a.generate_board().await.unwrap(),
            b.generate_board().await.unwrap()
        );
    }
}
