//! Session-scoped count of resulting unit states already scored.
//!
//! The extended scorer's curiosity term rewards a unit for reaching a state it has never
//! reached before in the current session. A [`VisitRegistry`] is that memory. Each
//! registry is one session: parallel workers should each own a registry, and a new
//! session starts with [`VisitRegistry::reset`] or a fresh registry.
//!
//! Counting is guarded by a mutex, so a registry shared between threads still records
//! every visit exactly once and reports "first visit" to exactly one caller.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tactica_core::UnitState;
use tracing::debug;

#[derive(Debug, Default)]
pub struct VisitRegistry {
    visits: Mutex<HashMap<UnitState, u64>>,
}

impl VisitRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit to `state` and returns `true` if it was the first one this session.
    pub fn record_visit(&self, state: &UnitState) -> bool {
        let mut visits = self.lock();
        let count = visits.entry(state.clone()).or_insert(0);
        let first = *count == 0;
        *count = count.saturating_add(1);
        first
    }

    /// Returns how many times `state` has been recorded this session.
    #[must_use]
    pub fn visit_count(&self, state: &UnitState) -> u64 {
        self.lock().get(state).copied().unwrap_or(0)
    }

    /// Returns the number of distinct states recorded this session.
    #[must_use]
    pub fn distinct_states(&self) -> usize {
        self.lock().len()
    }

    /// Forgets every recorded visit, starting a new session.
    pub fn reset(&self) {
        let mut visits = self.lock();
        debug!(distinct_states = visits.len(), "resetting visit registry");
        visits.clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<UnitState, u64>> {
        // counts stay consistent even if a holder panicked mid-update
        self.visits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use tactica_core::{Coord, TeamId, UnitId};

    use super::*;

    fn state(x: i32) -> UnitState {
        UnitState {
            position: Coord::new(x, 0),
            ..UnitState::new(UnitId(1), TeamId(1))
        }
    }

    #[test]
    fn test_first_visit_only_once() {
        let registry = VisitRegistry::new();
        assert!(registry.record_visit(&state(1)));
        assert!(!registry.record_visit(&state(1)));
        assert!(registry.record_visit(&state(2)));
        assert_eq!(registry.visit_count(&state(1)), 2);
        assert_eq!(registry.visit_count(&state(3)), 0);
        assert_eq!(registry.distinct_states(), 2);
    }

    #[test]
    fn test_reset_starts_new_session() {
        let registry = VisitRegistry::new();
        registry.record_visit(&state(1));
        registry.reset();
        assert_eq!(registry.visit_count(&state(1)), 0);
        assert!(registry.record_visit(&state(1)));
    }

    #[test]
    fn test_concurrent_first_visit_is_unique() {
        let registry = VisitRegistry::new();
        let firsts = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.record_visit(&state(5))))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|first| *first)
                .count()
        });
        assert_eq!(firsts, 1);
        assert_eq!(registry.visit_count(&state(5)), 8);
    }
}
