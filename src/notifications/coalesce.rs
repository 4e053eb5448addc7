// SPDX-License-Identifier: MPL-2.0
//! Per-frame batching of snapshots.
//!
//! A host that redraws once per frame does not need every intermediate
//! snapshot. [`FrameCoalescer`] keeps only the newest one and hands it out
//! on the next frame together with the theme and the paint order.

use super::appearance::{stack_layout, StackSlot};
use super::subscribers::SubscriptionGuard;
use super::toast::ToastState;
use super::toaster::Toaster;
use crate::theme::Theme;
use std::sync::{Arc, Mutex, PoisonError};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub state: ToastState,
    pub theme: Arc<Theme>,
    pub layout: Vec<StackSlot>,
}

/// Collapses bursts of snapshots into at most one per frame.
///
/// Unsubscribes from the toaster when dropped.
#[derive(Debug)]
pub struct FrameCoalescer {
    toaster: Toaster,
    latest: Arc<Mutex<Option<ToastState>>>,
    _subscription: SubscriptionGuard,
}

impl FrameCoalescer {
    pub fn attach(toaster: &Toaster) -> Self {
        let latest = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&latest);
        let subscription = toaster
            .subscribe(move |state: &ToastState| {
                *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
            })
            .guard();

        Self {
            toaster: toaster.clone(),
            latest,
            _subscription: subscription,
        }
    }

    /// Whether a snapshot arrived since the last frame.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.lock().is_some()
    }

    /// Takes the newest snapshot, if any arrived since the last call.
    pub fn take_frame(&self) -> Option<Frame> {
        let state = self.lock().take()?;
        let layout = stack_layout(&state);
        Some(Frame {
            state,
            theme: self.toaster.theme(),
            layout,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ToastState>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
