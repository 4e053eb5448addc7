// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all toast configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Auto-dismiss, exit animation and replacement windows
//! - **Stacking**: Visible toast limits
//! - **Colors**: Per-type accent/background pairs

use std::time::Duration;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default auto-dismiss duration for a toast (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 4_000;

/// Duration of the exit animation before a hidden toast is removed (in milliseconds).
pub const EXIT_DURATION_MS: u64 = 350;

/// Delay before a replacement toast is inserted in single-toast mode (in milliseconds).
///
/// The outgoing toast is removed at this point of its exit animation, so the
/// incoming one crossfades in instead of waiting for the full exit window.
pub const REPLACE_DELAY_MS: u64 = EXIT_DURATION_MS - 220;

/// Duration given to loading toasts tracked by a promise (one hour).
pub const LOADING_DURATION_MS: u64 = 60 * 60 * 1_000;

/// Default auto-dismiss duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(DEFAULT_DURATION_MS);

/// Exit animation window.
pub const EXIT_DURATION: Duration = Duration::from_millis(EXIT_DURATION_MS);

/// Single-toast replacement window.
pub const REPLACE_DELAY: Duration = Duration::from_millis(REPLACE_DELAY_MS);

/// Loading toast duration.
pub const LOADING_DURATION: Duration = Duration::from_millis(LOADING_DURATION_MS);

// ==========================================================================
// Stacking Defaults
// ==========================================================================

/// Default maximum number of simultaneously active toasts when stacking.
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Minimum allowed visible toast limit.
pub const MIN_MAX_VISIBLE: usize = 1;

/// Maximum allowed visible toast limit.
pub const MAX_MAX_VISIBLE: usize = 10;

// ==========================================================================
// Color Defaults
// ==========================================================================

/// Accent color of success toasts.
pub const SUCCESS_ACCENT: &str = "#28B770";

/// Accent color of error toasts.
pub const ERROR_ACCENT: &str = "#F05964";

/// Accent color of info toasts.
pub const INFO_ACCENT: &str = "#EDBE43";

/// Accent color of loading toasts.
pub const LOADING_ACCENT: &str = "#232323";

/// Background shared by every toast type.
pub const TOAST_BACKGROUND: &str = "#FFFFFF";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DURATION_MS > 0);
    assert!(EXIT_DURATION_MS > 0);
    assert!(REPLACE_DELAY_MS > 0);
    assert!(REPLACE_DELAY_MS <= EXIT_DURATION_MS);
    assert!(LOADING_DURATION_MS > DEFAULT_DURATION_MS);

    assert!(MIN_MAX_VISIBLE > 0);
    assert!(MAX_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
    assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults_are_valid() {
        assert_eq!(DEFAULT_DURATION_MS, 4_000);
        assert_eq!(EXIT_DURATION_MS, 350);
        assert_eq!(REPLACE_DELAY_MS, 130);
        assert_eq!(DEFAULT_DURATION, Duration::from_secs(4));
    }

    #[test]
    fn loading_duration_outlives_any_regular_toast() {
        assert!(LOADING_DURATION > DEFAULT_DURATION * 100);
    }

    #[test]
    fn stacking_defaults_are_valid() {
        assert_eq!(DEFAULT_MAX_VISIBLE, 3);
        assert!(DEFAULT_MAX_VISIBLE >= MIN_MAX_VISIBLE);
        assert!(DEFAULT_MAX_VISIBLE <= MAX_MAX_VISIBLE);
    }
}
