// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Store` owns the visible toast list, the active theme and every timer.
//! It is a deterministic state machine: each operation receives the current
//! time explicitly, and delayed transitions are entries in a [`TimerQueue`]
//! that [`Store::fire_due`] drains in deadline order.
//!
//! Snapshots produced by mutations are queued in an outbox; the owning
//! [`Toaster`](super::Toaster) delivers them to subscribers outside its lock.

use super::timers::{TimerKey, TimerKind, TimerQueue};
use super::toast::{Toast, ToastId, ToastOptions, ToastState, ToastType, ToastUpdate};
use crate::config::defaults::{EXIT_DURATION, REPLACE_DELAY};
use crate::config::ToastConfig;
use crate::theme::{self, Theme};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// A toast waiting for the outgoing one to leave (single-toast mode).
#[derive(Debug)]
struct Replacement {
    id: ToastId,
    /// `None` once the incoming toast was dismissed before it appeared.
    toast: Option<Toast>,
    evicted: Vec<ToastId>,
    deadline: Duration,
}

#[derive(Debug)]
pub(crate) struct Store {
    toasts: Vec<Toast>,
    state: ToastState,
    theme: Arc<Theme>,
    timers: TimerQueue,
    pending: Option<Replacement>,
    next_id: u64,
    outbox: VecDeque<ToastState>,
    delivering: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            state: ToastState::default(),
            theme: Arc::new(Theme::default()),
            timers: TimerQueue::new(),
            pending: None,
            next_id: 0,
            outbox: VecDeque::new(),
            delivering: false,
        }
    }

    pub fn state(&self) -> ToastState {
        self.state.clone()
    }

    pub fn theme(&self) -> Arc<Theme> {
        Arc::clone(&self.theme)
    }

    pub fn set_config(&mut self, config: Option<&ToastConfig>) {
        self.theme = Arc::new(theme::resolve(config));
        debug!(
            stacking = self.theme.stacking,
            cap = self.theme.effective_cap(),
            "toast theme replaced"
        );
    }

    /// Creates a toast and admits it under the current stacking policy.
    pub fn show(
        &mut self,
        now: Duration,
        title: String,
        description: Option<String>,
        toast_type: ToastType,
        duration: Option<Duration>,
        options: Option<ToastOptions>,
    ) -> ToastId {
        let option_duration = options.as_ref().and_then(|o| o.duration);
        let duration = duration
            .filter(|d| !d.is_zero())
            .or(option_duration.filter(|d| !d.is_zero()))
            .unwrap_or(self.theme.default_duration);
        let description =
            description.or_else(|| options.as_ref().and_then(|o| o.description.clone()));

        self.next_id += 1;
        let id = ToastId::from_raw(self.next_id);
        let toast = Toast::new(id, title, description, toast_type, duration, options);
        debug!(%id, ?toast_type, ?duration, "toast shown");

        // At most one replacement is ever pending.
        let mut carried: Option<Replacement> = None;
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(TimerKey::replace(pending.id));
            if self.theme.stacking {
                self.complete_replacement(now, pending);
            } else {
                debug!(superseded = %pending.id, by = %id, "pending replacement superseded");
                carried = Some(pending);
            }
        }

        let cap = self.theme.effective_cap();
        let active = self.active_ids();
        let candidates: Vec<ToastId> = if active.len() >= cap {
            active[cap - 1..].to_vec()
        } else {
            Vec::new()
        };
        for candidate in &candidates {
            self.timers.cancel(TimerKey::auto_dismiss(*candidate));
        }

        if self.theme.stacking {
            if !candidates.is_empty() {
                // Stack overflow is a hard cap, not a dismissal: no exit animation.
                self.toasts.retain(|t| !candidates.contains(&t.id()));
                debug!(evicted = ?candidates, "stack overflow evicted toasts");
            }
            self.insert(now, toast);
        } else if candidates.is_empty() && carried.is_none() {
            self.insert(now, toast);
        } else {
            for t in &mut self.toasts {
                if candidates.contains(&t.id()) {
                    t.mark_exiting();
                }
            }
            if !candidates.is_empty() {
                self.emit();
            }

            let (mut evicted, deadline) = match carried {
                Some(previous) => (previous.evicted, previous.deadline),
                None => (Vec::new(), now + REPLACE_DELAY),
            };
            evicted.extend(candidates);
            trace!(%id, ?deadline, "replacement scheduled");
            self.timers.schedule(TimerKey::replace(id), deadline);
            self.pending = Some(Replacement {
                id,
                toast: Some(toast),
                evicted,
                deadline,
            });
        }

        id
    }

    /// Merges fields into an existing toast. Unknown ids are ignored.
    pub fn update(&mut self, now: Duration, id: ToastId, update: ToastUpdate) {
        let mut update = update;
        if let Some(duration) = update.duration.filter(|d| d.is_zero()) {
            trace!(%id, ?duration, "zero duration replaced by theme default");
            update.duration = Some(self.theme.default_duration);
        }

        if let Some(pending) = self.pending.as_mut().filter(|p| p.id == id) {
            if let Some(toast) = pending.toast.as_mut() {
                toast.apply(&update);
            }
            return;
        }

        let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
            return;
        };
        toast.apply(&update);
        let is_exiting = toast.is_exiting();
        self.emit();

        if let Some(duration) = update.duration {
            if is_exiting {
                return;
            }
            if let Some(position) = self.active_position(id) {
                self.schedule_auto_dismiss(now, id, duration, position);
            }
        }
    }

    /// Starts the exit of a toast. Absent or already exiting toasts are ignored.
    pub fn hide(&mut self, now: Duration, id: ToastId) {
        if let Some(pending) = self.pending.as_mut().filter(|p| p.id == id) {
            if pending.toast.take().is_some() {
                debug!(%id, "pending toast dismissed before it appeared");
            }
            return;
        }

        let Some(toast) = self.toasts.iter_mut().find(|t| t.id() == id) else {
            return;
        };
        if toast.is_exiting() {
            return;
        }
        toast.mark_exiting();
        self.timers.cancel(TimerKey::auto_dismiss(id));
        debug!(%id, "toast exiting");
        self.emit();

        self.timers.schedule(TimerKey::remove(id), now + EXIT_DURATION);
    }

    /// Drops every toast and timer at once, without exit animations.
    pub fn hide_all(&mut self) {
        self.timers.clear();
        if let Some(pending) = self.pending.take() {
            debug!(id = %pending.id, "pending replacement dropped");
        }
        self.toasts.clear();
        debug!("all toasts cleared");
        self.emit();
    }

    /// Fires every timer due at or before `now`, each at its own deadline.
    pub fn fire_due(&mut self, now: Duration) {
        while let Some((deadline, key)) = self.timers.pop_due(now) {
            trace!(id = %key.id, kind = ?key.kind, ?deadline, "timer fired");
            match key.kind {
                TimerKind::AutoDismiss => self.hide(deadline, key.id),
                TimerKind::Remove => self.remove(deadline, key.id),
                TimerKind::Replace => {
                    if let Some(pending) = self.pending.take_if(|p| p.id == key.id) {
                        self.complete_replacement(deadline, pending);
                    }
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[cfg(test)]
    pub fn timer_deadline(&self, key: TimerKey) -> Option<Duration> {
        self.timers.deadline(key)
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    pub fn has_pending_replacement(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the next undelivered snapshot and marks delivery as in progress.
    ///
    /// Returns `None` while another delivery is running; that delivery picks
    /// up whatever is queued once it finishes.
    pub fn begin_delivery(&mut self) -> Option<ToastState> {
        if self.delivering {
            return None;
        }
        let state = self.outbox.pop_front()?;
        self.delivering = true;
        Some(state)
    }

    pub fn end_delivery(&mut self) {
        self.delivering = false;
    }

    fn insert(&mut self, now: Duration, toast: Toast) {
        let id = toast.id();
        let duration = toast.duration;
        self.toasts.insert(0, toast);
        self.emit();

        self.schedule_auto_dismiss(now, id, duration, 0);
        self.reschedule_all(now);
    }

    fn remove(&mut self, now: Duration, id: ToastId) {
        self.timers.cancel(TimerKey::auto_dismiss(id));
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id() != id);
        if self.toasts.len() == before {
            return;
        }
        debug!(%id, "toast removed");
        self.emit();
        self.reschedule_all(now);
    }

    fn complete_replacement(&mut self, now: Duration, replacement: Replacement) {
        let Replacement { toast, evicted, .. } = replacement;
        for id in &evicted {
            self.timers.cancel(TimerKey::auto_dismiss(*id));
            self.timers.cancel(TimerKey::remove(*id));
        }

        let before = self.toasts.len();
        self.toasts.retain(|t| !evicted.contains(&t.id()));
        let changed = self.toasts.len() != before;
        if changed {
            debug!(?evicted, "replaced toasts removed");
            self.emit();
        }

        match toast {
            Some(toast) => self.insert(now, toast),
            None if changed => self.reschedule_all(now),
            None => {}
        }
    }

    fn schedule_auto_dismiss(&mut self, now: Duration, id: ToastId, base: Duration, position: usize) {
        let multiplier = u32::try_from(position + 1).unwrap_or(u32::MAX);
        let delay = base.saturating_mul(multiplier);
        trace!(%id, position, ?delay, "auto-dismiss scheduled");
        self.timers
            .schedule(TimerKey::auto_dismiss(id), now.saturating_add(delay));
    }

    /// Recomputes the timer of every active toast behind the front one.
    fn reschedule_all(&mut self, now: Duration) {
        let plan: Vec<(ToastId, Duration, usize)> = self
            .toasts
            .iter()
            .filter(|t| !t.is_exiting())
            .enumerate()
            .skip(1)
            .map(|(position, t)| (t.id(), t.duration, position))
            .collect();
        for (id, duration, position) in plan {
            self.schedule_auto_dismiss(now, id, duration, position);
        }
    }

    fn active_ids(&self) -> Vec<ToastId> {
        self.toasts
            .iter()
            .filter(|t| !t.is_exiting())
            .map(Toast::id)
            .collect()
    }

    fn active_position(&self, id: ToastId) -> Option<usize> {
        self.toasts
            .iter()
            .filter(|t| !t.is_exiting())
            .position(|t| t.id() == id)
    }

    fn emit(&mut self) {
        self.state = ToastState::new(self.toasts.clone());
        self.outbox.push_back(self.state.clone());
    }
}
