//! The seam between the move cycle and whatever draws it.

use async_trait::async_trait;

use tui_match_term::Frame;
use tui_match_types::Coord;

use crate::barrier::CompletionSignal;

/// Drives the visual side of a move cycle.
///
/// Handles are looked up by the coordinate they had in the most recently
/// presented frame. A missing handle completes at once: `swap` returns
/// immediately and `remove`/`fall` drop their signal.
#[async_trait]
pub trait Animator: Send {
    /// Replace everything on screen with `frame`.
    fn present(&mut self, frame: Frame);

    /// Exchange the tiles at `a` and `b` and resolve when the motion is over.
    async fn swap(&mut self, a: Coord, b: Coord);

    /// Fade out the tile at `at`; `done` fires when the fade ends.
    fn remove(&mut self, at: Coord, done: CompletionSignal);

    /// Move the tile at `from` down to `to`; `done` fires on landing.
    fn fall(&mut self, from: Coord, to: Coord, done: CompletionSignal);
}
