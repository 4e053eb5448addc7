// SPDX-License-Identifier: MPL-2.0
//! `bread` is a framework-agnostic toast notification store.
//!
//! It keeps the list of visible toasts, drives their stacking and timed
//! dismissal, and lets any part of an application raise, update or dismiss
//! toasts through a cloneable [`notifications::Toaster`] handle. Rendering is
//! left to the host; it subscribes to immutable state snapshots and reads the
//! resolved [`theme::Theme`].

#![doc(html_root_url = "https://docs.rs/bread/0.3.0")]

pub mod config;
pub mod error;
pub mod notifications;
pub mod theme;
