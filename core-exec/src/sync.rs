//! Blocking synchronization primitives.
//!
//! [`Rendezvous`] hands exactly one outcome from a producer (usually a
//! completion callback running on a worker thread) to one consumer parked in
//! [`Rendezvous::wait`].
//!
//! # Protocol
//!
//! 1. The consumer arms the rendezvous with [`enter`](Rendezvous::enter)
//!    *before* the producer can possibly run.
//! 2. The producer settles it with [`fulfill`](Rendezvous::fulfill) or
//!    [`reject`](Rendezvous::reject), which stores the outcome and releases
//!    one pending entry.
//! 3. The consumer's [`wait`](Rendezvous::wait) returns once no entries are
//!    pending.
//!
//! Because the counter is armed first, a producer that settles before the
//! consumer reaches `wait` (even on the consumer's own thread) is never lost.
//!
//! The first outcome wins. Later settles still release their entry but their
//! value is dropped, so a caller never observes both an output and an error.
//!
//! # Examples
//!
//! ```rust
//! use core_exec::{dispatch, Rendezvous};
//! use std::sync::Arc;
//!
//! let rendezvous: Arc<Rendezvous<String, std::io::Error>> = Rendezvous::armed();
//! let producer = Arc::clone(&rendezvous);
//! dispatch(move || {
//!     producer.fulfill("done".to_string());
//! });
//!
//! assert_eq!(rendezvous.wait().unwrap(), "done");
//! ```

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;

struct Slots<T, E> {
    pending: usize,
    outcome: Option<Result<T, E>>,
}

/// A single-use rendezvous carrying either an output or an error.
pub struct Rendezvous<T, E> {
    slots: Mutex<Slots<T, E>>,
    released: Condvar,
}

impl<T, E> Rendezvous<T, E> {
    /// Creates an unarmed rendezvous.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots {
                pending: 0,
                outcome: None,
            }),
            released: Condvar::new(),
        }
    }

    /// Creates a shared rendezvous already armed for one release.
    pub fn armed() -> Arc<Self> {
        let rendezvous = Arc::new(Self::new());
        rendezvous.enter();
        rendezvous
    }

    /// Registers one pending release.
    pub fn enter(&self) {
        let mut slots = self.slots.lock();
        slots.pending += 1;
        tracing::trace!(pending = slots.pending, "Rendezvous armed");
    }

    /// Stores an output and releases one pending entry.
    ///
    /// Returns `false` if an outcome was already stored.
    pub fn fulfill(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Stores an error and releases one pending entry.
    ///
    /// Returns `false` if an outcome was already stored.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Stores `outcome` unless one is already present, then releases one
    /// pending entry.
    ///
    /// Settling a rendezvous with nothing pending is ignored.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        let mut slots = self.slots.lock();

        if slots.pending == 0 {
            tracing::warn!("Rendezvous settled with no pending entry; outcome dropped");
            return false;
        }
        slots.pending -= 1;

        let accepted = slots.outcome.is_none();
        if accepted {
            slots.outcome = Some(outcome);
        } else {
            tracing::debug!("Rendezvous already settled; late outcome dropped");
        }

        if slots.pending == 0 {
            self.released.notify_all();
        }
        tracing::trace!(accepted, pending = slots.pending, "Rendezvous settled");
        accepted
    }

    /// Whether an outcome has been stored and nothing is pending.
    pub fn is_settled(&self) -> bool {
        let slots = self.slots.lock();
        slots.pending == 0 && slots.outcome.is_some()
    }

    /// Parks the calling thread until every pending entry is released, then
    /// takes the stored outcome.
    ///
    /// There is no timeout. If nobody ever settles the rendezvous, this
    /// never returns.
    pub fn wait(&self) -> Result<T, E> {
        let mut slots = self.slots.lock();
        loop {
            if slots.pending == 0 {
                if let Some(outcome) = slots.outcome.take() {
                    return outcome;
                }
            }
            self.released.wait(&mut slots);
        }
    }
}

impl<T, E> Default for Rendezvous<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Rendezvous<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.lock();
        f.debug_struct("Rendezvous")
            .field("pending", &slots.pending)
            .field("settled", &slots.outcome.is_some())
            .finish()
    }
}
