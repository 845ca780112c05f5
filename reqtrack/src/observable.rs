use crate::{OverlapPolicy, TrackerOptions};
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::trace;

/// Sequence number handed to each trigger call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Observable state owned by one tracker.
///
/// Writers go through [`begin`](StateCell::begin) and
/// [`settle`](StateCell::settle). Once the owning tracker is dropped the
/// `alive` token is cancelled and every further publication is dropped.
pub struct StateCell<S> {
    state: Mutable<S>,
    alive: CancellationToken,
    generation: Arc<AtomicU64>,
    overlap: OverlapPolicy,
}

impl<S> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        StateCell {
            state: self.state.clone(),
            alive: self.alive.clone(),
            generation: self.generation.clone(),
            overlap: self.overlap,
        }
    }
}

impl<S: Clone + Send + Sync + 'static> StateCell<S> {
    /// Creates the cell together with the guard that marks its owner alive.
    pub fn new(initial_state: S, options: TrackerOptions) -> (Self, DropGuard) {
        let alive = CancellationToken::new();
        let guard = alive.clone().drop_guard();
        let cell = StateCell {
            state: Mutable::new(initial_state),
            alive,
            generation: Arc::new(AtomicU64::new(0)),
            overlap: options.overlap,
        };
        (cell, guard)
    }

    pub fn get(&self) -> S {
        self.state.get_cloned()
    }

    pub fn signal(&self) -> MutableSignalCloned<S> {
        self.state.signal_cloned()
    }

    pub fn stream(&self) -> SignalStream<MutableSignalCloned<S>> {
        self.state.signal_cloned().to_stream()
    }

    pub fn is_alive(&self) -> bool {
        !self.alive.is_cancelled()
    }

    pub fn current(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::SeqCst))
    }

    /// Starts a new invocation: takes the next ticket and publishes its
    /// pending state, replacing whatever was there.
    pub fn begin(&self, pending: S) -> Ticket {
        let mut state = self.state.lock_mut();
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        if self.is_alive() {
            *state = pending;
        } else {
            trace!(ticket = ticket.0, "owner dropped, pending state not published");
        }
        ticket
    }

    /// Replaces the observable state outside of any invocation, e.g. to reset
    /// it. Tickets are left alone, so a call in flight can still settle.
    /// Returns whether the observable state was updated.
    pub fn publish(&self, state: S) -> bool {
        let mut current = self.state.lock_mut();
        if !self.is_alive() {
            trace!("owner dropped, state not published");
            return false;
        }
        *current = state;
        true
    }

    /// Publishes the terminal state of `ticket`. Returns whether the
    /// observable state was updated.
    pub fn settle(&self, ticket: Ticket, terminal: S) -> bool {
        let mut state = self.state.lock_mut();
        if !self.is_alive() {
            trace!(ticket = ticket.0, "owner dropped, terminal state not published");
            return false;
        }
        if self.overlap == OverlapPolicy::LatestOnly && self.current() != ticket {
            trace!(
                ticket = ticket.0,
                latest = self.current().0,
                "superseded call settled, terminal state not published"
            );
            return false;
        }
        *state = terminal;
        true
    }
}
