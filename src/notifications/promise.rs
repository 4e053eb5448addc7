// SPDX-License-Identifier: MPL-2.0
//! Loading toasts tracked by a future.
//!
//! [`Toaster::promise`] shows a loading toast, awaits the operation and turns
//! that same toast into a success or error toast. The operation's failure is
//! never propagated: the caller always gets a [`PromiseResult`].

use super::toaster::Toaster;
use super::toast::{ToastType, ToastUpdate};
use crate::config::defaults::LOADING_DURATION;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Title, optional description and optional duration of a toast message.
///
/// Plain strings convert into a title-only message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub description: Option<String>,
    /// Duration once the operation settles. `None` uses the theme default.
    pub duration: Option<Duration>,
}

impl Message {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

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
}

impl From<&str> for Message {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for Message {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// Message shown when the operation fails: fixed, or computed from the error.
pub enum ErrorMessage<E> {
    Static(Message),
    Computed(Box<dyn Fn(&E) -> Message + Send + Sync>),
}

impl<E> ErrorMessage<E> {
    /// Builds the message from the error at failure time.
    pub fn from_fn<F, M>(f: F) -> Self
    where
        F: Fn(&E) -> M + Send + Sync + 'static,
        M: Into<Message>,
    {
        ErrorMessage::Computed(Box::new(move |error| f(error).into()))
    }

    /// Resolves to a concrete message for `error`.
    pub fn resolve(&self, error: &E) -> Message {
        match self {
            ErrorMessage::Static(message) => message.clone(),
            ErrorMessage::Computed(f) => f(error),
        }
    }
}

impl<E> From<Message> for ErrorMessage<E> {
    fn from(message: Message) -> Self {
        ErrorMessage::Static(message)
    }
}

impl<E> From<&str> for ErrorMessage<E> {
    fn from(title: &str) -> Self {
        ErrorMessage::Static(title.into())
    }
}

impl<E> From<String> for ErrorMessage<E> {
    fn from(title: String) -> Self {
        ErrorMessage::Static(title.into())
    }
}

impl<E> fmt::Debug for ErrorMessage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMessage::Static(message) => f.debug_tuple("Static").field(message).finish(),
            ErrorMessage::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Messages for each phase of a tracked operation.
#[derive(Debug)]
pub struct PromiseMessages<E> {
    pub loading: Message,
    pub success: Message,
    pub error: ErrorMessage<E>,
}

impl<E> PromiseMessages<E> {
    pub fn new(
        loading: impl Into<Message>,
        success: impl Into<Message>,
        error: impl Into<ErrorMessage<E>>,
    ) -> Self {
        Self {
            loading: loading.into(),
            success: success.into(),
            error: error.into(),
        }
    }
}

/// Outcome of a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromiseResult<T, E> {
    Success { data: T },
    Failure { error: E },
}

impl<T, E> PromiseResult<T, E> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, PromiseResult::Success { .. })
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            PromiseResult::Success { data } => Ok(data),
            PromiseResult::Failure { error } => Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for PromiseResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => PromiseResult::Success { data },
            Err(error) => PromiseResult::Failure { error },
        }
    }
}

impl Toaster {
    /// Tracks `operation` with a loading toast that settles into success or error.
    ///
    /// The loading toast stays up (for an hour, unless the loading message
    /// sets a duration) until the operation completes. If it is dismissed in
    /// the meantime the settled update is silently dropped.
    pub async fn promise<T, E, F>(&self, operation: F, messages: PromiseMessages<E>) -> PromiseResult<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let PromiseMessages {
            loading,
            success,
            error: error_message,
        } = messages;

        let id = self.show(
            loading.title,
            loading.description,
            Some(ToastType::Loading),
            Some(loading.duration.unwrap_or(LOADING_DURATION)),
            None,
        );
        debug!(%id, "tracking operation");

        match operation.await {
            Ok(data) => {
                self.update(id, self.settled(success, ToastType::Success));
                debug!(%id, "operation succeeded");
                PromiseResult::Success { data }
            }
            Err(error) => {
                let message = error_message.resolve(&error);
                self.update(id, self.settled(message, ToastType::Error));
                debug!(%id, "operation failed");
                PromiseResult::Failure { error }
            }
        }
    }

    fn settled(&self, message: Message, toast_type: ToastType) -> ToastUpdate {
        let duration = message
            .duration
            .unwrap_or_else(|| self.theme().default_duration);
        ToastUpdate {
            title: Some(message.title),
            description: Some(message.description),
            toast_type: Some(toast_type),
            duration: Some(duration),
        }
    }
}
