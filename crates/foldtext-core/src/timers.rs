//! Single-threaded deferred callbacks.
//!
//! There is no background thread: the host polls [`DeferredQueue::drain_due`]
//! from its own frame or tick loop. Items are never cancelled explicitly, so
//! whatever they carry must be validated against current state when fired.

use std::time::Instant;

/// Items waiting for a deadline.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    pending: Vec<(Instant, T)>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `item` to fire at `at`.
    pub fn schedule(&mut self, at: Instant, item: T) {
        self.pending.push((at, item));
    }

    /// Remove and return every item whose deadline is at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for (at, item) in self.pending.drain(..) {
            if at <= now {
                due.push((at, item));
            } else {
                waiting.push((at, item));
            }
        }
        self.pending = waiting;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, item)| item).collect()
    }

    /// The earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(at, _)| *at).min()
    }
}
