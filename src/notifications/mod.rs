// SPDX-License-Identifier: MPL-2.0
//! Toast notification store for user feedback.
//!
//! This module owns the ordered list of visible toasts and drives their
//! lifecycle (appear, stack, auto-dismiss, exit, remove) independently of any
//! widget tree. Any code holding a [`Toaster`] can raise or dismiss toasts;
//! renderers subscribe to immutable [`ToastState`] snapshots.
//!
//! # Components
//!
//! - [`toast`] - `Toast` record, `ToastType` and the `ToastState` snapshot
//! - `store` - Lifecycle engine: stacking cap, timers, replacement
//! - `toaster` - `Toaster` handle, listener delivery and the tokio driver
//! - [`promise`] - Loading toasts that settle with a future
//! - [`appearance`] - Colors, icon and paint order for renderers
//! - [`coalesce`] - One snapshot per frame for frame-driven hosts
//!
//! # Usage
//!
//! ```
//! use bread::notifications::{ManualClock, Toaster, ToastType};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualClock::new());
//! let toaster = Toaster::with_clock(clock.clone());
//! let _subscription = toaster.subscribe(|state| {
//!     println!("{} toast(s) visible", state.len());
//! });
//!
//! toaster.error("Upload failed", "Check your connection", None);
//! assert_eq!(toaster.state().visible_toasts()[0].toast_type, ToastType::Error);
//!
//! // Auto-dismiss after the default 4 s, then removal after the exit window.
//! clock.advance(Duration::from_millis(4_000));
//! toaster.tick();
//! clock.advance(Duration::from_millis(350));
//! toaster.tick();
//! assert!(toaster.state().is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - Newest toast first; at most 3 active toasts by default, 1 without stacking
//! - Auto-dismiss delay grows with stack depth: `duration * (1 + position)`
//! - Exit window: 350 ms; single-toast replacement lands 130 ms after the exit starts
//! - Listeners run outside the store lock and may call back into the toaster

pub mod appearance;
pub mod coalesce;
mod clock;
pub mod promise;
mod store;
mod subscribers;
mod timers;
pub mod toast;
mod toaster;

pub use appearance::{front_dismissible, stack_layout, Appearance, IconSource, StackSlot};
pub use clock::{Clock, ManualClock, TokioClock};
pub use coalesce::{Frame, FrameCoalescer};
pub use promise::{ErrorMessage, Message, PromiseMessages, PromiseResult};
pub use subscribers::{Listener, Subscription, SubscriptionGuard};
pub use toast::{Detail, Renderable, Toast, ToastId, ToastOptions, ToastState, ToastType, ToastUpdate};
pub use toaster::{ConfigScope, Toaster};
