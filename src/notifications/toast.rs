// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record, its `ToastType`, the per-record
//! `ToastOptions` override bag and the immutable `ToastState` snapshot that
//! subscribers receive.

use crate::theme::Style;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a toast.
///
/// Identifiers are allocated per store and never reused while the store lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Toast type determines colors, icon and close-button behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastType {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Something went wrong.
    Error,
    /// Informational message.
    Info,
    /// An operation is still running. Never shows a close button.
    Loading,
}

/// Opaque, type-erased content owned by the presentation layer.
///
/// Used for custom toast bodies and icons. The store never inspects it; the
/// renderer downcasts it back to whatever type it stored.
#[derive(Clone)]
pub struct Renderable(Arc<dyn Any + Send + Sync>);

impl Renderable {
    pub fn new<T: Any + Send + Sync>(content: T) -> Self {
        Self(Arc::new(content))
    }

    /// Returns the content if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns whether both handles point at the same content.
    #[must_use]
    pub fn ptr_eq(&self, other: &Renderable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderable(..)")
    }
}

/// Per-toast overrides. Shadows the theme for this toast only.
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub description: Option<String>,
    pub duration: Option<Duration>,
    pub icon: Option<Renderable>,
    /// Replaces the whole toast body (see [`Toaster::custom`](super::Toaster::custom)).
    pub content: Option<Renderable>,
    pub style: Option<Style>,
    pub title_style: Option<Style>,
    pub description_style: Option<Style>,
    pub dismissible: Option<bool>,
    pub show_close_button: Option<bool>,
}

impl ToastOptions {
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Renderable) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    #[must_use]
    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }
}

/// Second argument of the typed helpers: a description, an options bag, or nothing.
#[derive(Debug, Clone, Default)]
pub enum Detail {
    #[default]
    None,
    Description(String),
    Options(ToastOptions),
}

impl Detail {
    /// Splits into `(description, duration, options)`.
    pub(crate) fn into_parts(self) -> (Option<String>, Option<Duration>, Option<ToastOptions>) {
        match self {
            Detail::None => (None, None, None),
            Detail::Description(description) => (Some(description), None, None),
            Detail::Options(options) => (options.description.clone(), options.duration, Some(options)),
        }
    }
}

impl From<&str> for Detail {
    fn from(description: &str) -> Self {
        Detail::Description(description.to_owned())
    }
}

impl From<String> for Detail {
    fn from(description: String) -> Self {
        Detail::Description(description)
    }
}

impl From<ToastOptions> for Detail {
    fn from(options: ToastOptions) -> Self {
        Detail::Options(options)
    }
}

impl From<Option<&str>> for Detail {
    fn from(description: Option<&str>) -> Self {
        description.map_or(Detail::None, Detail::from)
    }
}

/// A toast record.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    pub title: String,
    pub description: Option<String>,
    pub toast_type: ToastType,
    /// Base auto-dismiss duration, before the stack position multiplier.
    pub duration: Duration,
    created_at: DateTime<Utc>,
    is_exiting: bool,
    pub options: Option<ToastOptions>,
}

impl Toast {
    pub(crate) fn new(
        id: ToastId,
        title: String,
        description: Option<String>,
        toast_type: ToastType,
        duration: Duration,
        options: Option<ToastOptions>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            toast_type,
            duration,
            created_at: Utc::now(),
            is_exiting: false,
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// When this toast was created. Diagnostic only.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the toast is animating out.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub(crate) fn mark_exiting(&mut self) {
        self.is_exiting = true;
    }

    pub(crate) fn apply(&mut self, update: &ToastUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
        if let Some(toast_type) = update.toast_type {
            self.toast_type = toast_type;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
    }
}

/// Partial field changes applied by [`Toaster::update`](super::Toaster::update).
///
/// Identity (`id`, `created_at`) can never be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub toast_type: Option<ToastType>,
    pub duration: Option<Duration>,
}

impl ToastUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn toast_type(mut self, toast_type: ToastType) -> Self {
        self.toast_type = Some(toast_type);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Immutable snapshot of the visible toasts (index 0 = front/newest).
///
/// Cloning is cheap; every mutation produces a new snapshot, so
/// [`ToastState::ptr_eq`] detects change.
#[derive(Debug, Clone, Default)]
pub struct ToastState {
    visible: Arc<[Toast]>,
}

impl ToastState {
    pub(crate) fn new(visible: Vec<Toast>) -> Self {
        Self {
            visible: visible.into(),
        }
    }

    /// Every toast in the list, exiting ones included.
    #[must_use]
    pub fn visible_toasts(&self) -> &[Toast] {
        &self.visible
    }

    /// Toasts that are not exiting, front first.
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.visible.iter().filter(|t| !t.is_exiting())
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    #[must_use]
    pub fn exiting_count(&self) -> usize {
        self.visible.len() - self.active_count()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.visible.iter().find(|t| t.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Returns whether both snapshots are the same emission.
    #[must_use]
    pub fn ptr_eq(&self, other: &ToastState) -> bool {
        Arc::ptr_eq(&self.visible, &other.visible)
    }
}
