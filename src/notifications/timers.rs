// SPDX-License-Identifier: MPL-2.0
//! Timer bookkeeping for the toast store.
//!
//! Every delayed transition of the lifecycle is one entry in a
//! [`TimerQueue`], keyed by `(kind, toast id)`:
//!
//! | kind          | fires after                        | transition                  |
//! |---------------|------------------------------------|-----------------------------|
//! | `AutoDismiss` | `duration * (1 + stack position)`  | active → exiting            |
//! | `Remove`      | exit window (350 ms)               | exiting → removed           |
//! | `Replace`     | replacement window (130 ms)        | replacing → inserted        |
//!
//! Scheduling a key that is already pending replaces it, so there is never
//! more than one live timer per key. Due timers pop in deadline order, ties
//! broken by scheduling order.

use super::toast::ToastId;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    AutoDismiss,
    Remove,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerKey {
    pub kind: TimerKind,
    pub id: ToastId,
}

impl TimerKey {
    pub fn auto_dismiss(id: ToastId) -> Self {
        Self {
            kind: TimerKind::AutoDismiss,
            id,
        }
    }

    pub fn remove(id: ToastId) -> Self {
        Self {
            kind: TimerKind::Remove,
            id,
        }
    }

    pub fn replace(id: ToastId) -> Self {
        Self {
            kind: TimerKind::Replace,
            id,
        }
    }
}

/// Deadline plus a sequence number for stable ordering of equal deadlines.
type Slot = (Duration, u64);

#[derive(Debug, Default)]
pub struct TimerQueue {
    by_deadline: BTreeMap<Slot, TimerKey>,
    by_key: HashMap<TimerKey, Slot>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` at `deadline`, cancelling any pending timer with the same key.
    pub fn schedule(&mut self, key: TimerKey, deadline: Duration) {
        self.cancel(key);
        let slot = (deadline, self.next_seq);
        self.next_seq += 1;
        self.by_deadline.insert(slot, key);
        self.by_key.insert(key, slot);
    }

    /// Cancels a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        match self.by_key.remove(&key) {
            Some(slot) => {
                self.by_deadline.remove(&slot);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.by_deadline.clear();
        self.by_key.clear();
    }

    #[cfg(test)]
    pub fn deadline(&self, key: TimerKey) -> Option<Duration> {
        self.by_key.get(&key).map(|(deadline, _)| *deadline)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.by_deadline.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerKey)> {
        let (&slot, _) = self.by_deadline.iter().next()?;
        if slot.0 > now {
            return None;
        }
        let key = self.by_deadline.remove(&slot)?;
        self.by_key.remove(&key);
        Some((slot.0, key))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ToastId {
        ToastId::from_raw(raw)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn rescheduling_replaces_the_pending_timer() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::auto_dismiss(id(1)), ms(100));
        queue.schedule(TimerKey::auto_dismiss(id(1)), ms(300));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.deadline(TimerKey::auto_dismiss(id(1))), Some(ms(300)));
        assert!(queue.pop_due(ms(200)).is_none());
    }

    #[test]
    fn kinds_are_independent_per_id() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::auto_dismiss(id(1)), ms(100));
        queue.schedule(TimerKey::remove(id(1)), ms(100));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn pops_in_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::auto_dismiss(id(3)), ms(50));
        queue.schedule(TimerKey::auto_dismiss(id(1)), ms(20));
        queue.schedule(TimerKey::remove(id(2)), ms(20));

        assert_eq!(queue.pop_due(ms(100)), Some((ms(20), TimerKey::auto_dismiss(id(1)))));
        assert_eq!(queue.pop_due(ms(100)), Some((ms(20), TimerKey::remove(id(2)))));
        assert_eq!(queue.pop_due(ms(100)), Some((ms(50), TimerKey::auto_dismiss(id(3)))));
        assert!(queue.pop_due(ms(100)).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_reports_whether_pending() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::replace(id(4)), ms(10));
        assert!(queue.cancel(TimerKey::replace(id(4))));
        assert!(!queue.cancel(TimerKey::replace(id(4))));
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKey::auto_dismiss(id(1)), ms(10));
        queue.schedule(TimerKey::remove(id(2)), ms(20));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.pop_due(ms(1_000)).is_none());
    }
}
