//! Debounce scheduling for Horizon Sortable.
//!
//! Provides [`Debouncer`], a map from signature strings to cancellable
//! deferred tasks. Re-scheduling a signature that already has a pending
//! task cancels the old task and replaces it (last-call-wins coalescing),
//! which is how rapid selection changes collapse into a single
//! notification after a quiet period.
//!
//! There is no background thread: the owner pumps [`Debouncer::process_expired`]
//! from its event loop (using [`Debouncer::time_until_next`] to sleep the
//! right amount) and must call [`Debouncer::cancel_all`] on teardown so no
//! task can fire against destroyed state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::{Result, SortableError};

/// A pending deferred task.
struct DebounceEntry {
    /// When this task should fire.
    deadline: Instant,
    /// The task to run.
    task: Box<dyn FnOnce() + Send>,
}

/// Signature-keyed deferred task scheduler with last-call-wins semantics.
pub struct Debouncer {
    /// Pending tasks by signature.
    entries: HashMap<String, DebounceEntry>,
}

impl Debouncer {
    /// Create an empty debouncer.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Schedule `task` to run after `delay`.
    ///
    /// If a task with the same signature is already pending it is dropped
    /// without running and replaced by this one, with a fresh deadline.
    pub fn call<F>(&mut self, signature: impl Into<String>, delay: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let signature = signature.into();
        let replaced = self
            .entries
            .insert(
                signature.clone(),
                DebounceEntry {
                    deadline: Instant::now() + delay,
                    task: Box::new(task),
                },
            )
            .is_some();
        tracing::trace!(
            target: "horizon_sortable_core::debounce",
            signature = %signature,
            replaced,
            "debounce scheduled"
        );
    }

    /// Cancel the pending task for a signature without running it.
    ///
    /// Returns an error if no task with that signature is pending.
    pub fn cancel(&mut self, signature: &str) -> Result<()> {
        match self.entries.remove(signature) {
            Some(_) => Ok(()),
            None => Err(SortableError::UnknownDebounceSignature(
                signature.to_string(),
            )),
        }
    }

    /// Cancel every pending task without running any of them.
    ///
    /// Call this on teardown; dropping the debouncer also discards pending
    /// tasks, but an explicit call makes the teardown order visible.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Whether a task with this signature is pending.
    pub fn is_pending(&self, signature: &str) -> bool {
        self.entries.contains_key(signature)
    }

    /// Number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Duration until the earliest pending task is due, if any.
    ///
    /// Returns `Duration::ZERO` when a task is already overdue.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .values()
            .map(|entry| entry.deadline.saturating_duration_since(now))
            .min()
    }

    /// Run every task whose deadline has passed, in deadline order.
    ///
    /// Returns the number of tasks that ran.
    pub fn process_expired(&mut self) -> usize {
        let now = Instant::now();
        let mut due: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(signature, _)| signature.clone())
            .collect();
        due.sort_by_key(|signature| self.entries[signature].deadline);

        let count = due.len();
        for signature in due {
            if let Some(entry) = self.entries.remove(&signature) {
                tracing::trace!(
                    target: "horizon_sortable_core::debounce",
                    signature = %signature,
                    "debounce fired"
                );
                (entry.task)();
            }
        }
        count
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_fire_after_delay() {
        let mut debounce = Debouncer::new();
        let fired = Arc::new(Mutex::new(false));

        let fired_clone = fired.clone();
        debounce.call("sig", Duration::ZERO, move || {
            *fired_clone.lock() = true;
        });

        assert!(debounce.is_pending("sig"));
        assert_eq!(debounce.process_expired(), 1);
        assert!(*fired.lock());
        assert!(!debounce.is_pending("sig"));
    }

    #[test]
    fn test_last_call_wins() {
        let mut debounce = Debouncer::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        for value in [1, 2, 3] {
            let received_clone = received.clone();
            debounce.call("sig", Duration::ZERO, move || {
                received_clone.lock().push(value);
            });
        }

        assert_eq!(debounce.pending_count(), 1);
        assert_eq!(debounce.process_expired(), 1);
        // Only the arguments from the last call survive.
        assert_eq!(*received.lock(), vec![3]);
    }

    #[test]
    fn test_distinct_signatures_coexist() {
        let mut debounce = Debouncer::new();
        let count = Arc::new(Mutex::new(0));

        for signature in ["a", "b"] {
            let count_clone = count.clone();
            debounce.call(signature, Duration::ZERO, move || {
                *count_clone.lock() += 1;
            });
        }

        assert_eq!(debounce.pending_count(), 2);
        assert_eq!(debounce.process_expired(), 2);
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_not_due_yet() {
        let mut debounce = Debouncer::new();
        debounce.call("sig", Duration::from_secs(3600), || {});

        assert_eq!(debounce.process_expired(), 0);
        assert!(debounce.is_pending("sig"));
        assert!(debounce.time_until_next().unwrap() > Duration::from_secs(3000));
    }

    #[test]
    fn test_cancel() {
        let mut debounce = Debouncer::new();
        let fired = Arc::new(Mutex::new(false));

        let fired_clone = fired.clone();
        debounce.call("sig", Duration::ZERO, move || {
            *fired_clone.lock() = true;
        });

        assert!(debounce.cancel("sig").is_ok());
        assert_eq!(debounce.process_expired(), 0);
        assert!(!*fired.lock());
    }

    #[test]
    fn test_cancel_unknown_signature() {
        let mut debounce = Debouncer::new();
        assert!(matches!(
            debounce.cancel("missing"),
            Err(SortableError::UnknownDebounceSignature(_))
        ));
    }

    #[test]
    fn test_cancel_all() {
        let mut debounce = Debouncer::new();
        debounce.call("a", Duration::ZERO, || {});
        debounce.call("b", Duration::ZERO, || {});

        debounce.cancel_all();
        assert_eq!(debounce.pending_count(), 0);
        assert_eq!(debounce.process_expired(), 0);
        assert!(debounce.time_until_next().is_none());
    }
}
