//! Search Debounce
//!
//! A single-slot trailing-edge debouncer. Each keystroke schedules the current query; scheduling
//! again before the window has passed cancels the earlier query and restarts the window, so only
//! the last query of a burst ever runs.
//!
//! The debouncer owns no timer. Callers pass the current [`Instant`] in and either poll with
//! [`Debouncer::take_due`], or arm a timer of their own and hand the returned [`TimerHandle`] back
//! through [`Debouncer::take_if_current`] when it fires.

use std::time::{Duration, Instant};

/// Default quiet window before a scheduled search runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one scheduled search. Handles from replaced or cancelled searches go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingSearch {
    handle: TimerHandle,
    query: String,
    due: Instant,
}

/// Debouncer
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Option<PendingSearch>,
    next_handle: u64,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            next_handle: 0,
        }
    }

    /// Schedule `query` to run once the window has passed, replacing any pending query.
    pub fn schedule(&mut self, query: String, now: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);

        self.next_handle = self.next_handle.wrapping_add(1);

        let due = now.checked_add(self.window).unwrap_or(now);

        self.pending = Some(PendingSearch { handle, query, due });

        handle
    }

    /// Drop the pending query, returning it if there was one.
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.query)
    }

    /// Take the pending query if its window has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|pending| now >= pending.due) {
            return self.cancel();
        }

        None
    }

    /// Take the pending query if `handle` still identifies it.
    pub fn take_if_current(&mut self, handle: TimerHandle) -> Option<String> {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.handle == handle)
        {
            return self.cancel();
        }

        None
    }

    /// The pending query, if any.
    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.query.as_str())
    }

    /// When the pending query becomes due, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Whether a query is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn query_runs_only_after_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.schedule("berry".to_string(), start);

        assert_eq!(debouncer.take_due(start + 299 * MS), None);
        assert_eq!(debouncer.take_due(start + 300 * MS).as_deref(), Some("berry"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rescheduling_replaces_and_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.schedule("be".to_string(), start);
        debouncer.schedule("ber".to_string(), start + 200 * MS);

        assert_eq!(debouncer.take_due(start + 300 * MS), None);
        assert_eq!(debouncer.pending_query(), Some("ber"));
        assert_eq!(debouncer.due_at(), Some(start + 500 * MS));
        assert_eq!(debouncer.take_due(start + 500 * MS).as_deref(), Some("ber"));
        assert_eq!(debouncer.take_due(start + 900 * MS), None);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        let stale = debouncer.schedule("man".to_string(), start);
        let current = debouncer.schedule("mango".to_string(), start);

        assert_ne!(stale, current);
        assert_eq!(debouncer.take_if_current(stale), None);
        assert_eq!(debouncer.take_if_current(current).as_deref(), Some("mango"));
        assert_eq!(debouncer.take_if_current(current), None);
    }

    #[test]
    fn cancel_clears_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);

        debouncer.schedule("coffee".to_string(), start);

        assert_eq!(debouncer.cancel().as_deref(), Some("coffee"));
        assert_eq!(debouncer.take_due(start), None);
    }
}
