// ── Gated reactive state cell ──
//
// One cell per synchronized entity. The whole value is replaced per
// fetch, never patched. Every cell carries a write gate: fetch actions
// draw a ticket before issuing their request and commit the result only
// if nothing fresher has committed since, so a late response from an
// older request can never clobber newer data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::config::ReplacePolicy;

/// Outcome of a gated commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Value stored, subscribers notified.
    Applied,
    /// Fresh result structurally equal to the current value; the stored
    /// allocation is untouched and nobody is woken.
    Unchanged,
    /// A fresher result committed first; this one was discarded.
    Stale,
}

pub(crate) struct EntityCell<T> {
    value: watch::Sender<Arc<T>>,
    issued: AtomicU64,
    committed: AtomicU64,
}

impl<T: PartialEq + Send + Sync + 'static> EntityCell<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (value, _) = watch::channel(Arc::new(initial));
        Self {
            value,
            issued: AtomicU64::new(0),
            committed: AtomicU64::new(0),
        }
    }

    /// Draw a ticket for a fetch about to be issued.
    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a fetched value under `ticket`.
    ///
    /// The gate check and the write run inside the sender's own lock, so
    /// commits are totally ordered even when fetches race.
    pub(crate) fn apply(&self, ticket: u64, next: T, policy: ReplacePolicy) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::Stale;
        self.value.send_if_modified(|current| {
            if ticket <= self.committed.load(Ordering::SeqCst) {
                return false;
            }
            // The gate advances even when the value is skipped as equal:
            // the fetch itself was fresh.
            self.committed.store(ticket, Ordering::SeqCst);

            if policy == ReplacePolicy::OnChange && **current == next {
                outcome = ApplyOutcome::Unchanged;
                return false;
            }
            *current = Arc::new(next);
            outcome = ApplyOutcome::Applied;
            true
        });
        outcome
    }

    pub(crate) fn snapshot(&self) -> Arc<T> {
        self.value.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<T>> {
        self.value.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn applies_fresh_results_in_ticket_order() {
        let cell = EntityCell::new(String::new());
        let first = cell.issue();
        let second = cell.issue();

        assert_eq!(
            cell.apply(first, "one".to_owned(), ReplacePolicy::Always),
            ApplyOutcome::Applied
        );
        assert_eq!(
            cell.apply(second, "two".to_owned(), ReplacePolicy::Always),
            ApplyOutcome::Applied
        );
        assert_eq!(*cell.snapshot(), "two");
    }

    #[test]
    fn discards_stale_commits() {
        let cell = EntityCell::new(String::new());
        let stale = cell.issue();
        let fresh = cell.issue();

        assert_eq!(
            cell.apply(fresh, "fresh".to_owned(), ReplacePolicy::Always),
            ApplyOutcome::Applied
        );
        assert_eq!(
            cell.apply(stale, "stale".to_owned(), ReplacePolicy::Always),
            ApplyOutcome::Stale
        );
        assert_eq!(*cell.snapshot(), "fresh");
    }

    #[test]
    fn on_change_skip_keeps_snapshot_identity() {
        let cell = EntityCell::new("same".to_owned());
        let before = cell.snapshot();

        let ticket = cell.issue();
        assert_eq!(
            cell.apply(ticket, "same".to_owned(), ReplacePolicy::OnChange),
            ApplyOutcome::Unchanged
        );
        assert!(Arc::ptr_eq(&before, &cell.snapshot()));
    }

    #[test]
    fn on_change_skip_does_not_wake_subscribers() {
        let cell = EntityCell::new("same".to_owned());
        let mut rx = cell.subscribe();
        rx.borrow_and_update();

        cell.apply(cell.issue(), "same".to_owned(), ReplacePolicy::OnChange);
        assert!(!rx.has_changed().unwrap());

        cell.apply(cell.issue(), "different".to_owned(), ReplacePolicy::OnChange);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn always_policy_notifies_even_when_equal() {
        let cell = EntityCell::new("same".to_owned());
        let mut rx = cell.subscribe();
        rx.borrow_and_update();

        assert_eq!(
            cell.apply(cell.issue(), "same".to_owned(), ReplacePolicy::Always),
            ApplyOutcome::Applied
        );
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn gate_advances_on_unchanged_commits() {
        let cell = EntityCell::new(String::new());
        assert_eq!(
            cell.apply(cell.issue(), "x".to_owned(), ReplacePolicy::OnChange),
            ApplyOutcome::Applied
        );

        let older = cell.issue();
        let newer = cell.issue();
        assert_eq!(
            cell.apply(newer, "x".to_owned(), ReplacePolicy::OnChange),
            ApplyOutcome::Unchanged
        );
        // The equal result consumed the watermark, so the older response
        // is stale even though its payload differs.
        assert_eq!(
            cell.apply(older, "y".to_owned(), ReplacePolicy::OnChange),
            ApplyOutcome::Stale
        );
        assert_eq!(*cell.snapshot(), "x");
    }
}
