//! Guard against out-of-order list loads.
//!
//! When identity resolution is asynchronous, a list re-fetch triggered by
//! identity becoming available can start before an earlier fetch resolves.
//! `LoadSequence` enforces last-issued-request-wins: each load captures a
//! ticket at start, and only the load whose ticket is still current when it
//! completes may apply its result. Stale results are dropped, never
//! reapplied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing load sequence.
#[derive(Debug, Default)]
pub struct LoadSequence {
    latest: AtomicU64,
}

impl LoadSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating every load issued earlier.
    /// Returns the ticket the load must present on completion.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Whether a completed load holding `ticket` is still the latest issued
    /// load and may apply its result.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Acquire) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_load_is_current() {
        let seq = LoadSequence::new();
        let ticket = seq.begin();
        assert!(seq.is_current(ticket));
    }

    #[test]
    fn stale_load_resolving_late_is_discarded() {
        let seq = LoadSequence::new();

        // Load 1 starts, load 2 starts before 1 resolves.
        let first = seq.begin();
        let second = seq.begin();

        // Load 1 resolves after 2: its result must be dropped, load 2's
        // result is the one displayed.
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn newest_load_always_wins() {
        let seq = LoadSequence::new();
        let tickets: Vec<u64> = (0..5).map(|_| seq.begin()).collect();

        for stale in &tickets[..4] {
            assert!(!seq.is_current(*stale));
        }
        assert!(seq.is_current(tickets[4]));
    }
}
