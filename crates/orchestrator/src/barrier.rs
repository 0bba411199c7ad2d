//! Completion barrier for animation phases.
//!
//! `Barrier::new(n)` hands out exactly `n` [`CompletionSignal`]s. The barrier
//! resolves once every signal has fired; with `n == 0` it resolves at once.
//! A signal fires when it is completed or dropped, so it cannot fire twice
//! and a lost signal cannot wedge the barrier.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug)]
struct Shared {
    remaining: AtomicUsize,
    notify: Notify,
}

/// Waits for a fixed number of completion signals.
#[derive(Debug)]
pub struct Barrier {
    expected: usize,
    shared: Arc<Shared>,
}

/// One outstanding completion. Fires on [`CompletionSignal::complete`] or drop.
#[derive(Debug)]
pub struct CompletionSignal {
    shared: Arc<Shared>,
}

impl Barrier {
    pub fn new(expected: usize) -> (Self, Vec<CompletionSignal>) {
        let shared = Arc::new(Shared {
            remaining: AtomicUsize::new(expected),
            notify: Notify::new(),
        });
        let signals = (0..expected)
            .map(|_| CompletionSignal {
                shared: Arc::clone(&shared),
            })
            .collect();
        (Self { expected, shared }, signals)
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Signals still outstanding.
    pub fn remaining(&self) -> usize {
        self.shared.remaining.load(Ordering::Acquire)
    }

    pub fn is_satisfied(&self) -> bool {
        self.remaining() == 0
    }

    /// Resolve once all signals have fired.
    pub async fn wait(self) {
        while self.remaining() > 0 {
            self.shared.notify.notified().await;
        }
    }
}

impl CompletionSignal {
    pub fn complete(self) {}
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        if self.shared.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
            // notify_one stores a permit when nobody is waiting yet.
            self.shared.notify.notify_one();
        }
    }
}
