// SPDX-License-Identifier: MPL-2.0
//! The public toast handle.
//!
//! A [`Toaster`] owns one [`Store`], the [`Clock`] it runs on and the
//! registered listeners. It is cheap to clone; every clone drives the same
//! store, so the application root can create one and hand clones to
//! whichever code needs to raise toasts.

use super::clock::{Clock, TokioClock};
use super::store::Store;
use super::subscribers::{Subscribers, Subscription};
use super::toast::{Detail, Renderable, ToastId, ToastOptions, ToastState, ToastType, ToastUpdate};
use crate::config::ToastConfig;
use crate::theme::Theme;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

struct Shared {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
    subscribers: Subscribers,
    /// Signalled whenever the timer schedule may have changed.
    wake: Notify,
}

/// Handle to a toast store.
///
/// ```
/// use bread::notifications::{ManualClock, Toaster};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(ManualClock::new());
/// let toaster = Toaster::with_clock(clock.clone());
///
/// let id = toaster.success("Saved", "Your changes have been saved", None);
/// assert_eq!(toaster.state().active_count(), 1);
///
/// toaster.dismiss(id);
/// clock.advance(Duration::from_millis(350));
/// toaster.tick();
/// assert!(toaster.state().is_empty());
/// ```
#[derive(Clone)]
pub struct Toaster {
    shared: Arc<Shared>,
}

impl Toaster {
    /// Creates a toaster running on tokio's clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(TokioClock::new()))
    }

    /// Creates a toaster running on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(Store::new()),
                clock,
                subscribers: Subscribers::default(),
                wake: Notify::new(),
            }),
        }
    }

    /// Shows a toast and returns its id.
    ///
    /// `toast_type` defaults to [`ToastType::Success`]. The duration is taken
    /// from `duration`, then `options.duration`, then the theme default.
    pub fn show(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        toast_type: Option<ToastType>,
        duration: Option<Duration>,
        options: Option<ToastOptions>,
    ) -> ToastId {
        let title = title.into();
        self.mutate(|store, now| {
            store.show(
                now,
                title,
                description,
                toast_type.unwrap_or_default(),
                duration,
                options,
            )
        })
    }

    /// Shows a success toast.
    pub fn success(
        &self,
        title: impl Into<String>,
        detail: impl Into<Detail>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.show_typed(ToastType::Success, title.into(), detail.into(), duration)
    }

    /// Shows an error toast.
    pub fn error(
        &self,
        title: impl Into<String>,
        detail: impl Into<Detail>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.show_typed(ToastType::Error, title.into(), detail.into(), duration)
    }

    /// Shows an info toast.
    pub fn info(
        &self,
        title: impl Into<String>,
        detail: impl Into<Detail>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.show_typed(ToastType::Info, title.into(), detail.into(), duration)
    }

    /// Shows a toast whose whole body is `content`.
    ///
    /// The title is empty and the type defaults to [`ToastType::Info`].
    pub fn custom(
        &self,
        content: Renderable,
        options: ToastOptions,
        toast_type: Option<ToastType>,
    ) -> ToastId {
        let duration = options.duration;
        let options = ToastOptions {
            content: Some(content),
            ..options
        };
        self.show(
            String::new(),
            None,
            Some(toast_type.unwrap_or(ToastType::Info)),
            duration,
            Some(options),
        )
    }

    /// Merges fields into a toast. Unknown ids are ignored.
    pub fn update(&self, id: ToastId, update: ToastUpdate) {
        self.mutate(|store, now| store.update(now, id, update));
    }

    /// Starts the exit animation of a toast. Unknown or exiting ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        self.mutate(|store, now| store.hide(now, id));
    }

    /// Removes every toast immediately.
    pub fn dismiss_all(&self) {
        self.mutate(|store, _| store.hide_all());
    }

    /// Replaces the active theme. `None` restores the defaults.
    pub fn set_config(&self, config: Option<&ToastConfig>) {
        self.lock().set_config(config);
    }

    /// Installs `config` for as long as the returned scope lives.
    ///
    /// This is the provider lifecycle: mounting installs the configuration,
    /// unmounting (dropping the scope) resets to the defaults.
    pub fn provide(&self, config: Option<&ToastConfig>) -> ConfigScope {
        self.set_config(config);
        ConfigScope {
            toaster: self.clone(),
        }
    }

    /// Registers a listener invoked with every new state snapshot.
    pub fn subscribe(&self, listener: impl Fn(&ToastState) + Send + Sync + 'static) -> Subscription {
        self.shared.subscribers.add(Arc::new(listener))
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.subscribers.len()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> ToastState {
        self.lock().state()
    }

    /// Current theme snapshot.
    #[must_use]
    pub fn theme(&self) -> Arc<Theme> {
        self.lock().theme()
    }

    /// The clock this toaster runs on.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.shared.clock
    }

    /// Fires every timer that is due on the toaster's clock.
    ///
    /// Host event loops call this from their frame or tick handler; tests call
    /// it after advancing a [`ManualClock`](super::ManualClock).
    pub fn tick(&self) {
        let now = self.shared.clock.now();
        self.lock().fire_due(now);
        self.flush();
    }

    /// Deadline of the next pending timer, on the toaster's clock.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.lock().next_deadline()
    }

    /// Drives the timers on the tokio runtime until the future is dropped.
    ///
    /// Expects a clock that follows tokio time, such as [`TokioClock`].
    pub async fn run(&self) {
        loop {
            self.tick();
            let wait = self
                .next_deadline()
                .map(|deadline| deadline.saturating_sub(self.shared.clock.now()));
            match wait {
                Some(wait) => {
                    tokio::select! {
                        () = tokio::time::sleep(wait) => {}
                        () = self.shared.wake.notified() => {}
                    }
                }
                None => self.shared.wake.notified().await,
            }
        }
    }

    /// Spawns [`Toaster::run`] on the current tokio runtime.
    pub fn spawn_driver(&self) -> tokio::task::JoinHandle<()> {
        let toaster = self.clone();
        tokio::spawn(async move { toaster.run().await })
    }

    fn show_typed(
        &self,
        toast_type: ToastType,
        title: String,
        detail: Detail,
        duration: Option<Duration>,
    ) -> ToastId {
        let (description, option_duration, options) = detail.into_parts();
        self.show(
            title,
            description,
            Some(toast_type),
            duration.or(option_duration),
            options,
        )
    }

    fn mutate<R>(&self, apply: impl FnOnce(&mut Store, Duration) -> R) -> R {
        let now = self.shared.clock.now();
        let result = {
            let mut store = self.lock();
            store.fire_due(now);
            apply(&mut store, now)
        };
        self.flush();
        self.shared.wake.notify_one();
        result
    }

    /// Delivers queued snapshots outside the store lock, in mutation order.
    fn flush(&self) {
        loop {
            let Some(state) = self.lock().begin_delivery() else {
                return;
            };
            let _delivery = DeliveryGuard(self);
            self.shared.subscribers.notify(&state);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.shared
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("state", &self.state())
            .field("subscribers", &self.shared.subscribers.len())
            .finish_non_exhaustive()
    }
}

/// Ends a delivery even if a listener panics.
struct DeliveryGuard<'a>(&'a Toaster);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().end_delivery();
    }
}

/// Configuration installed by [`Toaster::provide`]; resets to defaults on drop.
#[must_use = "dropping the scope immediately resets the configuration"]
#[derive(Debug)]
pub struct ConfigScope {
    toaster: Toaster,
}

impl Drop for ConfigScope {
    fn drop(&mut self) {
        self.toaster.set_config(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn toaster() -> (Arc<ManualClock>, Toaster) {
        let clock = Arc::new(ManualClock::new());
        (Arc::clone(&clock), Toaster::with_clock(clock))
    }

    #[test]
    fn typed_helpers_set_type_and_description() {
        let (_, toaster) = toaster();
        let ok = toaster.success("Saved", "All good", None);
        let bad = toaster.error("Failed", Detail::None, None);
        let tip = toaster.info(
            "Tip",
            ToastOptions::default()
                .description("Swipe up")
                .duration(Duration::from_millis(1_500)),
            None,
        );

        let state = toaster.state();
        let ok = state.get(ok).expect("success toast");
        assert_eq!(ok.toast_type, ToastType::Success);
        assert_eq!(ok.description.as_deref(), Some("All good"));
        assert_eq!(state.get(bad).map(|t| t.toast_type), Some(ToastType::Error));
        let tip = state.get(tip).expect("info toast");
        assert_eq!(tip.description.as_deref(), Some("Swipe up"));
        assert_eq!(tip.duration, Duration::from_millis(1_500));
        assert!(tip.options.is_some());
    }

    #[test]
    fn explicit_duration_beats_options_duration() {
        let (_, toaster) = toaster();
        let id = toaster.info(
            "Tip",
            ToastOptions::default().duration(Duration::from_millis(1_500)),
            Some(Duration::from_millis(700)),
        );
        assert_eq!(
            toaster.state().get(id).map(|t| t.duration),
            Some(Duration::from_millis(700))
        );
    }

    #[test]
    fn show_defaults_to_success() {
        let (_, toaster) = toaster();
        let id = toaster.show("plain", None, None, None, None);
        assert_eq!(
            toaster.state().get(id).map(|t| t.toast_type),
            Some(ToastType::Success)
        );
    }

    #[test]
    fn custom_toasts_carry_content() {
        let (_, toaster) = toaster();
        let id = toaster.custom(Renderable::new("body"), ToastOptions::default(), None);

        let state = toaster.state();
        let toast = state.get(id).expect("custom toast");
        assert!(toast.title.is_empty());
        assert_eq!(toast.toast_type, ToastType::Info);
        let content = toast.options.as_ref().and_then(|o| o.content.as_ref());
        assert_eq!(content.and_then(|c| c.downcast_ref::<&str>()), Some(&"body"));
    }

    #[test]
    fn listeners_see_every_mutation_in_order() {
        let (_, toaster) = toaster();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = toaster.subscribe(move |state| {
            sink.lock().unwrap().push(state.len());
        });

        let a = toaster.success("a", Detail::None, None);
        toaster.success("b", Detail::None, None);
        toaster.dismiss(a);
        toaster.dismiss_all();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 2, 0]);
    }

    #[test]
    fn listener_may_call_back_into_the_toaster() {
        let (_, toaster) = toaster();
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = toaster.clone();
        let counter = Arc::clone(&calls);
        let _sub = toaster.subscribe(move |state| {
            counter.fetch_add(1, Ordering::SeqCst);
            // Read access and nested mutations must not deadlock.
            let _ = inner.state();
            if state.len() == 1 {
                inner.info("follow-up", Detail::None, None);
            }
        });

        toaster.success("first", Detail::None, None);
        assert_eq!(toaster.state().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn mutations_fire_overdue_timers_first() {
        let (clock, toaster) = toaster();
        let id = toaster.success("a", Detail::None, Some(Duration::from_millis(100)));
        clock.advance(Duration::from_millis(100));

        toaster.info("b", Detail::None, None);
        let state = toaster.state();
        assert!(state.get(id).is_some_and(|t| t.is_exiting()));
        assert_eq!(state.active_count(), 1);
    }

    #[test]
    fn provide_resets_config_on_drop() {
        let (_, toaster) = toaster();
        {
            let _scope = toaster.provide(Some(&ToastConfig::default().stacking(false)));
            assert!(!toaster.theme().stacking);
        }
        assert!(toaster.theme().stacking);
    }

    #[test]
    fn clones_share_one_store() {
        let (_, toaster) = toaster();
        let other = toaster.clone();
        other.success("shared", Detail::None, None);
        assert_eq!(toaster.state().len(), 1);
    }
}
