//! Mutex-guarded duel handle for multi-threaded hosts.
//!
//! `Duel`'s mutating calls take `&mut self`, so a single owner already has
//! exclusive access. `SharedDuel` is for hosts that drive one duel from
//! several threads (a UI thread plus a loader, say): every call takes the
//! lock, so at most one `start`, `set_selection` or
//! `resolve_pending_exchange` runs at a time.
//!
//! The engine leaves no partially-applied state between public calls, so a
//! poisoned lock is recovered rather than propagated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::engine::{Duel, Resolution};
use super::events::EventSink;
use crate::cards::Selection;
use crate::core::{CoinSource, DuelResult, DuelRng};

/// Clonable, thread-safe handle to one duel.
pub struct SharedDuel<S: EventSink, C: CoinSource = DuelRng> {
    inner: Arc<Mutex<Duel<S, C>>>,
}

impl<S: EventSink, C: CoinSource> Clone for SharedDuel<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventSink, C: CoinSource> SharedDuel<S, C> {
    #[must_use]
    pub fn new(duel: Duel<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(duel)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Duel<S, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self) -> DuelResult<()> {
        self.lock().start()
    }

    pub fn set_selection(&self, selection: impl Into<Option<Selection>>) -> DuelResult<()> {
        self.lock().set_selection(selection)
    }

    pub fn resolve_pending_exchange(&self) -> DuelResult<Resolution> {
        self.lock().resolve_pending_exchange()
    }

    /// Run `f` with exclusive access to the duel.
    pub fn with<R>(&self, f: impl FnOnce(&mut Duel<S, C>) -> R) -> R {
        f(&mut self.lock())
    }
}
