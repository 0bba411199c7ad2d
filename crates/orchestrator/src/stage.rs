//! Time-based animation stage for the terminal.
//!
//! The stage holds the last presented [`Frame`] and a set of tweens keyed by
//! the handle's coordinate in that frame. The render loop calls
//! [`Stage::advance`] every tick; finished tweens are dropped and any
//! completion signal they carry fires with them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::trace;

use tui_match_term::{Frame, Scene, Sprite, SpriteEffect, TilePitch};
use tui_match_types::{Coord, APPEAR_MS, FALL_MS, REMOVE_MS, SWAP_MS};

use crate::animator::Animator;
use crate::barrier::CompletionSignal;

/// Per-phase animation durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub swap: Duration,
    pub remove: Duration,
    pub fall: Duration,
    pub appear: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            swap: Duration::from_millis(SWAP_MS),
            remove: Duration::from_millis(REMOVE_MS),
            fall: Duration::from_millis(FALL_MS),
            appear: Duration::from_millis(APPEAR_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenKind {
    Swap { to: Coord },
    Remove,
    Fall { to: Coord },
    Appear,
}

#[derive(Debug)]
struct Tween {
    handle: Coord,
    kind: TweenKind,
    started: Instant,
    duration: Duration,
    done: Option<CompletionSignal>,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Debug)]
pub struct Stage {
    frame: Frame,
    tweens: Vec<Tween>,
    timings: AnimationTimings,
}

impl Stage {
    pub fn new(frame: Frame, timings: AnimationTimings) -> Self {
        Self {
            frame,
            tweens: Vec::new(),
            timings,
        }
    }

    /// An empty stage, before the first board arrives.
    pub fn blank(timings: AnimationTimings) -> Self {
        Self::new(Frame::empty(0, 0, TilePitch::default()), timings)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn timings(&self) -> AnimationTimings {
        self.timings
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Swap in a freshly rendered frame. Tweens of the previous frame are
    /// discarded (their signals fire); flagged handles start their entrance.
    pub fn present(&mut self, frame: Frame, now: Instant) {
        self.tweens.clear();
        let appear = self.timings.appear;
        self.tweens.extend(frame.handles().filter(|h| h.appear).map(|h| Tween {
            handle: h.coord,
            kind: TweenKind::Appear,
            started: now,
            duration: appear,
            done: None,
        }));
        self.frame = frame;
    }

    /// Start moving `a` and `b` toward each other's slot. Returns false, and
    /// starts nothing, if either handle is missing.
    pub fn begin_swap(&mut self, a: Coord, b: Coord, now: Instant) -> bool {
        if self.frame.handle(a).is_none() || self.frame.handle(b).is_none() {
            return false;
        }
        let duration = self.timings.swap;
        for (handle, to) in [(a, b), (b, a)] {
            self.tweens.push(Tween {
                handle,
                kind: TweenKind::Swap { to },
                started: now,
                duration,
                done: None,
            });
        }
        true
    }

    /// Put swapped tiles back on their own slots.
    pub fn end_swap(&mut self, a: Coord, b: Coord) {
        self.tweens.retain(|t| {
            !(matches!(t.kind, TweenKind::Swap { .. }) && (t.handle == a || t.handle == b))
        });
    }

    pub fn begin_removal(&mut self, at: Coord, done: CompletionSignal, now: Instant) {
        if self.frame.handle(at).is_none() {
            trace!(%at, "no tile to remove");
            return;
        }
        self.tweens.push(Tween {
            handle: at,
            kind: TweenKind::Remove,
            started: now,
            duration: self.timings.remove,
            done: Some(done),
        });
    }

    pub fn begin_fall(&mut self, from: Coord, to: Coord, done: CompletionSignal, now: Instant) {
        if self.frame.handle(from).is_none() {
            trace!(%from, "no tile to drop");
            return;
        }
        self.tweens.push(Tween {
            handle: from,
            kind: TweenKind::Fall { to },
            started: now,
            duration: self.timings.fall,
            done: Some(done),
        });
    }

    /// Retire finished tweens. Returns how many finished.
    pub fn advance(&mut self, now: Instant) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| !t.finished(now));
        before - self.tweens.len()
    }

    /// Every handle of the current frame, positioned for `now`.
    pub fn sprites(&self, now: Instant) -> Vec<Sprite> {
        let pitch = self.frame.pitch();
        self.frame
            .handles()
            .map(|handle| {
                let mut sprite = Sprite::at_rest(handle);
                for tween in self.tweens.iter().filter(|t| t.handle == handle.coord) {
                    let t = tween.progress(now);
                    match tween.kind {
                        TweenKind::Swap { to } | TweenKind::Fall { to } => {
                            let (tx, ty) = pitch.origin(to);
                            sprite.x = lerp(handle.x as f32, tx as f32, ease_out(t));
                            sprite.y = lerp(handle.y as f32, ty as f32, ease_out(t));
                            sprite.effect = SpriteEffect::Moving;
                        }
                        TweenKind::Remove => sprite.effect = SpriteEffect::Removing(t),
                        TweenKind::Appear => sprite.effect = SpriteEffect::Appearing(t),
                    }
                }
                sprite
            })
            .collect()
    }

    pub fn scene(&self, now: Instant) -> Scene {
        let mut scene = Scene::still(&self.frame);
        scene.sprites = self.sprites(now);
        scene
    }
}

/// Shared handle to a [`Stage`]: the render loop reads and advances it, the
/// move cycle animates through it.
#[derive(Debug, Clone)]
pub struct StageHandle {
    inner: Arc<Mutex<Stage>>,
}

impl StageHandle {
    pub fn new(stage: Stage) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stage)),
        }
    }

    /// Lock the stage. A panic while locked does not poison later frames.
    pub fn lock(&self) -> MutexGuard<'_, Stage> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn advance(&self, now: Instant) -> usize {
        self.lock().advance(now)
    }

    pub fn scene(&self, now: Instant) -> Scene {
        self.lock().scene(now)
    }
}

#[async_trait]
impl Animator for StageHandle {
    fn present(&mut self, frame: Frame) {
        self.lock().present(frame, Instant::now());
    }

    async fn swap(&mut self, a: Coord, b: Coord) {
        let duration = {
            let mut stage = self.lock();
            if !stage.begin_swap(a, b, Instant::now()) {
                return;
            }
            stage.timings().swap
        };
        tokio::time::sleep(duration).await;
        self.lock().end_swap(a, b);
    }

    fn remove(&mut self, at: Coord, done: CompletionSignal) {
        self.lock().begin_removal(at, done, Instant::now());
    }

    fn fall(&mut self, from: Coord, to: Coord, done: CompletionSignal) {
        self.lock().begin_fall(from, to, done, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barrier::Barrier;
    use tui_match_term::Renderer;
    use tui_match_types::Board;

    fn stage() -> Stage {
        let board = Board::from_rows(vec![vec![1, 2], vec![0, 3]]).unwrap();
        let frame = Renderer::default().render(&board, 0, None, false);
        Stage::new(frame, AnimationTimings::default())
    }

    #[test]
    fn missing_handles_fire_immediately() {
        let mut stage = stage();
        let now = Instant::now();
        let (barrier, mut signals) = Barrier::new(2);
        stage.begin_removal(Coord::new(0, 1), signals.remove(0), now);
        stage.begin_fall(Coord::new(0, 1), Coord::new(0, 1), signals.remove(0), now);
        assert!(barrier.is_satisfied());
        assert!(!stage.is_animating());
        assert!(!stage.begin_swap(Coord::new(0, 0), Coord::new(0, 1), now));
    }

    #[test]
    fn removal_fires_when_duration_elapses() {
        let mut stage = stage();
        let now = Instant::now();
        let (barrier, mut signals) = Barrier::new(1);
        stage.begin_removal(Coord::new(1, 0), signals.remove(0), now);

        assert_eq!(stage.advance(now + Duration::from_millis(299)), 0);
        assert_eq!(barrier.remaining(), 1);
        assert_eq!(stage.advance(now + Duration::from_millis(300)), 1);
        assert!(barrier.is_satisfied());
    }

    #[test]
    fn fall_sprite_moves_toward_landing_slot() {
        let mut stage = stage();
        let now = Instant::now();
        let (_barrier, mut signals) = Barrier::new(1);
        stage.begin_fall(Coord::new(0, 0), Coord::new(0, 1), signals.remove(0), now);

        let start = stage.sprites(now);
        let mid = stage.sprites(now + Duration::from_millis(150));
        let end = stage.sprites(now + Duration::from_millis(300));
        let y = |s: &[Sprite]| s.iter().find(|s| s.coord == Coord::new(0, 0)).unwrap().y;

        assert_eq!(y(&start), 0.0);
        assert!(y(&mid) > 0.0 && y(&mid) < 2.0);
        assert_eq!(y(&end), 2.0);
    }

    #[test]
    fn present_drops_old_tweens_and_starts_entrance() {
        let mut stage = stage();
        let now = Instant::now();
        let (barrier, mut signals) = Barrier::new(1);
        stage.begin_removal(Coord::new(0, 0), signals.remove(0), now);

        let board = Board::from_rows(vec![vec![4, 4]]).unwrap();
        stage.present(Renderer::default().render(&board, 3, None, true), now);

        assert!(barrier.is_satisfied());
        let sprites = stage.sprites(now);
        assert_eq!(sprites.len(), 2);
        assert!(sprites
            .iter()
            .all(|s| s.effect == SpriteEffect::Appearing(0.0)));
        assert_eq!(stage.scene(now).score, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn swap_holds_for_its_duration() {
        let mut handle = StageHandle::new(stage());
        let started = Instant::now();
        handle.swap(Coord::new(0, 0), Coord::new(1, 0)).await;
        assert!(started.elapsed() >= Duration::from_millis(SWAP_MS));
        assert!(!handle.lock().is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn swap_with_missing_tile_returns_at_once() {
        let mut handle = StageHandle::new(stage());
        let started = Instant::now();
        handle.swap(Coord::new(0, 0), Coord::new(0, 1)).await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
