//! Interaction and animation orchestration.
//!
//! A move cycle is a strictly ordered chain of suspension points:
//!
//! ```text
//! swap (timed) -> engine round trip -> removal barrier -> fall barrier -> commit
//! ```
//!
//! - [`Barrier`] counts completion signals for the removal and fall phases.
//! - [`Animator`] is the drawing seam; [`StageHandle`] implements it with
//!   time-based tweens for the terminal.
//! - [`run_move_cycle`] sequences one cycle and hands the session back.
//! - [`Game`] owns the session and the selection machine and keeps input
//!   locked while a cycle is in flight.

pub mod animator;
pub mod barrier;
pub mod controller;
pub mod cycle;
pub mod stage;

pub use animator::Animator;
pub use barrier::{Barrier, CompletionSignal};
pub use controller::Game;
pub use cycle::{run_move_cycle, CycleOutcome, CycleReport};
pub use stage::{AnimationTimings, Stage, StageHandle};
