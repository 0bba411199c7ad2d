//! Game controller: selection, session and the in-flight move cycle.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;

use tui_match_core::{
    BoardEngine, ClickOutcome, EngineClient, EngineError, SelectionMachine, Session,
};
use tui_match_term::Renderer;
use tui_match_types::Coord;

use crate::animator::Animator;
use crate::cycle::{run_move_cycle, CycleOutcome, CycleReport};

enum Phase {
    Ready(Session),
    /// The cycle future owns the session until it completes.
    Pending(BoxFuture<'static, CycleReport>),
    /// Only observed transiently while switching phases.
    Vacant,
}

pub struct Game<E, A> {
    client: Arc<EngineClient<E>>,
    animator: A,
    renderer: Renderer,
    selection: SelectionMachine,
    phase: Phase,
    columns: usize,
    rows: usize,
}

impl<E, A> Game<E, A>
where
    E: BoardEngine + 'static,
    A: Animator + Clone + 'static,
{
    /// Generate the first board and present it.
    pub async fn start(
        client: Arc<EngineClient<E>>,
        mut animator: A,
        renderer: Renderer,
    ) -> Result<Self, EngineError> {
        let session = client.generate_board().await?;
        animator.present(renderer.render(session.board(), session.score(), None, false));
        Ok(Self {
            columns: session.board().width(),
            rows: session.board().height(),
            client,
            animator,
            renderer,
            selection: SelectionMachine::new(),
            phase: Phase::Ready(session),
        })
    }

    /// The committed session, unless a move cycle currently owns it.
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending(_))
    }

    /// Board size in cells. Fixed for a session.
    pub fn board_size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Feed a click at board coordinate `at` through the selection machine.
    pub fn click(&mut self, at: Coord) -> ClickOutcome {
        let session = match std::mem::replace(&mut self.phase, Phase::Vacant) {
            Phase::Ready(session) => session,
            other => {
                self.phase = other;
                debug!(%at, "click ignored while a move is resolving");
                return ClickOutcome::Locked;
            }
        };

        let outcome = self.selection.click(session.board(), at);
        match outcome {
            ClickOutcome::Selected(_) | ClickOutcome::Deselected => {
                self.animator.present(self.renderer.render(
                    session.board(),
                    session.score(),
                    self.selection.selected(),
                    false,
                ));
            }
            ClickOutcome::Move(attempt) => {
                debug!(%attempt, "starting move cycle");
                self.animator.present(self.renderer.render(
                    session.board(),
                    session.score(),
                    None,
                    false,
                ));
                let cycle = run_move_cycle(
                    session,
                    Arc::clone(&self.client),
                    self.animator.clone(),
                    self.renderer,
                    attempt,
                );
                self.phase = Phase::Pending(cycle.boxed());
                return outcome;
            }
            ClickOutcome::Ignored | ClickOutcome::Locked => {}
        }
        self.phase = Phase::Ready(session);
        outcome
    }

    /// Drive the in-flight move cycle to completion and unlock input.
    ///
    /// Never resolves while no cycle is pending. Cancel safe: dropping the
    /// returned future leaves the cycle in place to be resumed later.
    pub async fn settled(&mut self) -> CycleOutcome {
        let Phase::Pending(cycle) = &mut self.phase else {
            return std::future::pending().await;
        };
        let report = cycle.await;
        self.phase = Phase::Ready(report.session);
        self.selection.complete_cycle();
        report.outcome
    }

    /// Replace the session with a fresh board. Refused (`Ok(false)`) while a
    /// move cycle is pending; on error the current session is kept.
    pub async fn new_game(&mut self) -> Result<bool, EngineError> {
        if self.is_pending() {
            debug!("new game refused while a move is resolving");
            return Ok(false);
        }
        let session = self.client.generate_board().await?;
        self.selection.clear();
        self.columns = session.board().width();
        self.rows = session.board().height();
        self.animator.present(self.renderer.render(
            session.board(),
            session.score(),
            None,
            false,
        ));
        self.phase = Phase::Ready(session);
        Ok(true)
    }
}
