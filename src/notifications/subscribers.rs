// SPDX-License-Identifier: MPL-2.0
//! Listener registry for state snapshots.

use super::toast::ToastState;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

pub type Listener = Arc<dyn Fn(&ToastState) + Send + Sync>;

#[derive(Default)]
struct Registry {
    listeners: BTreeMap<u64, Listener>,
    next_key: u64,
}

/// Registered listeners, invoked in registration order.
#[derive(Default, Clone)]
pub(crate) struct Subscribers {
    registry: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub fn add(&self, listener: Listener) -> Subscription {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let key = registry.next_key;
        registry.next_key += 1;
        registry.listeners.insert(key, listener);
        Subscription {
            registry: Arc::downgrade(&self.registry),
            key: Some(key),
        }
    }

    /// Invokes every listener registered when the call starts.
    ///
    /// The registry lock is not held while a listener runs, so listeners may
    /// subscribe or unsubscribe freely. A listener removed mid-notification
    /// is skipped; one added mid-notification waits for the next snapshot.
    pub fn notify(&self, state: &ToastState) {
        let keys: Vec<u64> = self.lock().listeners.keys().copied().collect();
        for key in keys {
            let listener = self.lock().listeners.get(&key).cloned();
            if let Some(listener) = listener {
                listener(state);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`Toaster::subscribe`](super::Toaster::subscribe).
///
/// Call [`Subscription::unsubscribe`] to stop receiving snapshots. Dropping
/// the handle keeps the listener registered; use [`Subscription::guard`] for
/// scope-bound registration.
#[derive(Debug)]
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    key: Option<u64>,
}

impl Subscription {
    /// Removes the listener. Other listeners are unaffected.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Converts into a guard that unsubscribes when dropped.
    pub fn guard(self) -> SubscriptionGuard {
        SubscriptionGuard(self)
    }

    fn remove(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&key);
        }
    }
}

/// Unsubscribes on drop.
#[derive(Debug)]
pub struct SubscriptionGuard(Subscription);

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.0.remove();
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("listeners", &self.listeners.len())
            .field("next_key", &self.next_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Listener) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let listener: Listener = Arc::new(move |_: &ToastState| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn notifies_every_listener() {
        let subscribers = Subscribers::default();
        let (a, la) = counter();
        let (b, lb) = counter();
        let _sa = subscribers.add(la);
        let _sb = subscribers.add(lb);

        subscribers.notify(&ToastState::default());
        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let subscribers = Subscribers::default();
        let (a, la) = counter();
        let (b, lb) = counter();
        let sa = subscribers.add(la);
        let _sb = subscribers.add(lb);

        sa.unsubscribe();
        subscribers.notify(&ToastState::default());
        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn guard_unsubscribes_on_drop() {
        let subscribers = Subscribers::default();
        let (count, listener) = counter();
        {
            let _guard = subscribers.add(listener).guard();
            subscribers.notify(&ToastState::default());
        }
        subscribers.notify(&ToastState::default());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_added_during_notify_waits_for_next_snapshot() {
        let subscribers = Subscribers::default();
        let (late, late_listener) = counter();
        let registry = subscribers.clone();
        let pending = Mutex::new(Some(late_listener));
        let handles = Arc::new(Mutex::new(Vec::new()));
        let keep = Arc::clone(&handles);
        let _s = subscribers.add(Arc::new(move |_: &ToastState| {
            if let Some(listener) = pending.lock().unwrap().take() {
                keep.lock().unwrap().push(registry.add(listener));
            }
        }));

        subscribers.notify(&ToastState::default());
        assert_eq!(late.load(Ordering::SeqCst), 0);

        subscribers.notify(&ToastState::default());
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_removed_during_notify_is_skipped() {
        let subscribers = Subscribers::default();
        let (victim_count, victim) = counter();
        let victim_sub = Arc::new(Mutex::new(None::<Subscription>));
        let slot = Arc::clone(&victim_sub);

        let _first = subscribers.add(Arc::new(move |_: &ToastState| {
            if let Some(sub) = slot.lock().unwrap().take() {
                sub.unsubscribe();
            }
        }));
        *victim_sub.lock().unwrap() = Some(subscribers.add(victim));

        subscribers.notify(&ToastState::default());
        assert_eq!(victim_count.load(Ordering::SeqCst), 0);
    }
}
