//! Linear undo/redo history built on full-scene snapshots.
//!
//! `past` holds pre-mutation snapshots oldest first; `future` holds undone
//! states nearest first. A commit always discards `future`, so history never
//! branches. Undo and redo swap the live scene with the top of one stack and
//! push the displaced scene onto the other; they never commit.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::doc::Snapshot;

/// Past/future snapshot stacks with an optional depth cap.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: VecDeque<Snapshot>,
    capacity: Option<usize>,
    eviction_logged: bool,
}

impl History {
    /// Unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `capacity` entries per stack. `None` or `Some(0)`
    /// means unbounded.
    #[must_use]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self { capacity: capacity.filter(|&c| c > 0), ..Self::default() }
    }

    /// Configured depth cap, if any.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Record a copy of `snapshot` as the newest undo target and drop any redo branch.
    pub fn commit(&mut self, snapshot: &Snapshot) {
        self.past.push_back(snapshot.clone());
        self.future.clear();
        self.trim_past();
        tracing::debug!(past = self.past.len(), "history commit");
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Replace `live` with the newest past snapshot. Returns `false` (and
    /// leaves `live` alone) when there is nothing to undo.
    pub fn undo(&mut self, live: &mut Snapshot) -> bool {
        let Some(prev) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(live, prev);
        self.future.push_front(current);
        self.trim_future();
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        true
    }

    /// Replace `live` with the nearest future snapshot. Returns `false` (and
    /// leaves `live` alone) when there is nothing to redo.
    pub fn redo(&mut self, live: &mut Snapshot) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(live, next);
        self.past.push_back(current);
        self.trim_past();
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        true
    }

    /// Number of undo steps available.
    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps available.
    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Undo targets, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter()
    }

    /// Redo targets, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &Snapshot> {
        self.future.iter()
    }

    fn trim_past(&mut self) {
        let Some(cap) = self.capacity else {
            return;
        };
        while self.past.len() > cap {
            self.past.pop_front();
            self.log_eviction(cap);
        }
    }

    fn trim_future(&mut self) {
        let Some(cap) = self.capacity else {
            return;
        };
        while self.future.len() > cap {
            self.future.pop_back();
            self.log_eviction(cap);
        }
    }

    fn log_eviction(&mut self, cap: usize) {
        if !self.eviction_logged {
            tracing::warn!(capacity = cap, "history capacity reached; evicting oldest snapshots");
            self.eviction_logged = true;
        }
    }
}
