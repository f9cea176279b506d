//! Independently updated display regions.
//!
//! Each region carries a generation counter. Starting a load takes a ticket;
//! finishing it only lands if no newer load has started since, so a slow
//! response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use parking_lot::Mutex;

/// What a region currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionState<T> {
    /// Nothing requested yet, or cleared.
    Empty,
    /// A load is in flight.
    Loading,
    /// Last load succeeded.
    Ready(T),
    /// Last load failed, with a short reason.
    Failed(String),
}

/// Proof that a load was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A display region whose state only the latest load may set.
pub struct Region<T> {
    name: &'static str,
    generation: AtomicU64,
    state: Mutex<RegionState<T>>,
}

impl<T: Clone> Region<T> {
    /// Empty region; `name` shows up in logs.
    pub fn new(name: &'static str) -> Self {
        Region {
            name,
            generation: AtomicU64::new(0),
            state: Mutex::new(RegionState::Empty),
        }
    }

    /// Start a new load. Any ticket issued before this one becomes stale.
    pub fn begin(&self) -> Ticket {
        let mut state = self.state.lock();
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        *state = RegionState::Loading;
        ticket
    }

    /// Whether no load has started since `ticket` was issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Apply the outcome of a load. Returns `false` when the ticket is stale
    /// and the outcome was dropped.
    pub fn complete(&self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        let mut state = self.state.lock();
        // checked under the lock so a concurrent begin() cannot slip in between
        if !self.is_current(ticket) {
            debug!("Dropping stale {} result (generation {})", self.name, ticket.0);
            return false;
        }
        *state = match outcome {
            Ok(value) => RegionState::Ready(value),
            Err(reason) => RegionState::Failed(reason),
        };
        true
    }

    /// Empty the region and invalidate in-flight loads.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = RegionState::Empty;
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> RegionState<T> {
        self.state.lock().clone()
    }
}
