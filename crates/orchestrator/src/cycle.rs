//! One move cycle: swap, engine round trip, removal, fall, commit.
//!
//! Phases run strictly in order and every suspension point is an `.await`
//! inside [`run_move_cycle`]. The session is moved into the cycle and handed
//! back in the [`CycleReport`], so nothing else can touch it mid-cycle.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tui_match_core::{BoardEngine, CycleDiff, EngineClient, EngineError, Session};
use tui_match_term::Renderer;
use tui_match_types::MoveAttempt;

use crate::animator::Animator;
use crate::barrier::Barrier;

/// How a move cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The engine resolved the move and the new state was committed.
    Applied {
        removed: usize,
        fell: usize,
        score: u32,
    },
    /// The engine returned the submitted board; nothing changed.
    Rejected,
    /// The round trip failed or the response was refused. The session still
    /// holds the last committed state.
    Failed(EngineError),
}

impl CycleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug)]
pub struct CycleReport {
    pub session: Session,
    pub outcome: CycleOutcome,
}

/// Run one full move cycle for `attempt` against `session`.
pub async fn run_move_cycle<E, A>(
    mut session: Session,
    client: Arc<EngineClient<E>>,
    mut animator: A,
    renderer: Renderer,
    attempt: MoveAttempt,
) -> CycleReport
where
    E: BoardEngine,
    A: Animator,
{
    animator.swap(attempt.from, attempt.to).await;

    let next = match client.move_tile(&session, attempt).await {
        Ok(next) => next,
        Err(err) => {
            warn!(%attempt, %err, "move failed, keeping the committed board");
            animator.present(renderer.render(session.board(), session.score(), None, false));
            return CycleReport {
                session,
                outcome: CycleOutcome::Failed(err),
            };
        }
    };

    if next.board == *session.board() {
        if next.score != session.score() {
            warn!(
                before = session.score(),
                after = next.score,
                "engine changed the score of a rejected move; ignoring"
            );
        }
        debug!(%attempt, "move rejected");
        animator.present(renderer.render(session.board(), session.score(), None, false));
        return CycleReport {
            session,
            outcome: CycleOutcome::Rejected,
        };
    }

    let diff = CycleDiff::between(session.board(), &next.board);
    debug!(
        %attempt,
        removed = diff.removed.len(),
        falls = diff.falls.len(),
        "animating resolved move"
    );

    let (removal, signals) = Barrier::new(diff.removed.len());
    for (&at, done) in diff.removed.iter().zip(signals) {
        animator.remove(at, done);
    }
    removal.wait().await;

    animator.present(renderer.render(
        &diff.fall_stage_board(session.board()),
        session.score(),
        None,
        false,
    ));
    let (fall, signals) = Barrier::new(diff.falls.len());
    for (step, done) in diff.falls.iter().zip(signals) {
        animator.fall(step.from, step.to, done);
    }
    fall.wait().await;

    session.commit(next);
    animator.present(renderer.render(session.board(), session.score(), None, true));
    let score = session.score();
    info!(score, "move committed");

    CycleReport {
        session,
        outcome: CycleOutcome::Applied {
            removed: diff.removed.len(),
            fell: diff.falls.len(),
            score,
        },
    }
}
