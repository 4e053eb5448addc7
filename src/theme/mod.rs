// SPDX-License-Identifier: MPL-2.0
//! Theme resolution.
//!
//! A [`Theme`] is the fully resolved, immutable configuration snapshot the
//! toast store and the presentation layer read from. It is produced by
//! [`resolve`], which deep-merges a partial [`ToastConfig`] over the built-in
//! defaults. Missing fields at any nesting level fall back to the default.
//!
//! ```
//! use bread::config::ToastConfig;
//! use bread::notifications::ToastType;
//! use bread::theme;
//!
//! let config = ToastConfig::default().accent(ToastType::Success, "#fff");
//! let theme = theme::resolve(Some(&config));
//!
//! assert_eq!(theme.colors.success.accent, "#fff");
//! assert_eq!(theme.colors.success.background, "#FFFFFF");
//! ```

mod color;
mod style;

pub use color::HexColor;
pub use style::Style;

use crate::config::defaults::{
    DEFAULT_DURATION, DEFAULT_MAX_VISIBLE, ERROR_ACCENT, INFO_ACCENT, LOADING_ACCENT,
    MAX_MAX_VISIBLE, MIN_MAX_VISIBLE, SUCCESS_ACCENT, TOAST_BACKGROUND,
};
use crate::config::{PartialColorScheme, PartialTypeColors, ToastConfig};
use crate::notifications::{Renderable, ToastType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Screen edge the toast stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

/// Maximum number of simultaneously active toasts when stacking is enabled.
///
/// Values outside the valid range (1–10) are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxVisible(usize);

impl MaxVisible {
    /// Creates a new limit, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE))
    }

    /// Returns the limit.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxVisible {
    fn default() -> Self {
        Self(DEFAULT_MAX_VISIBLE)
    }
}

/// Accent and background colors for one toast type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeColors {
    pub accent: HexColor,
    pub background: HexColor,
}

impl TypeColors {
    fn new(accent: &str, background: &str) -> Self {
        Self {
            accent: accent.into(),
            background: background.into(),
        }
    }

    fn merged(&self, partial: Option<&PartialTypeColors>) -> Self {
        let Some(partial) = partial else {
            return self.clone();
        };
        Self {
            accent: partial.accent.clone().unwrap_or_else(|| self.accent.clone()),
            background: partial
                .background
                .clone()
                .unwrap_or_else(|| self.background.clone()),
        }
    }
}

/// Colors for every toast type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub success: TypeColors,
    pub error: TypeColors,
    pub info: TypeColors,
    pub loading: TypeColors,
}

impl ColorScheme {
    /// Returns the colors used for the given toast type.
    #[must_use]
    pub fn get(&self, toast_type: ToastType) -> &TypeColors {
        match toast_type {
            ToastType::Success => &self.success,
            ToastType::Error => &self.error,
            ToastType::Info => &self.info,
            ToastType::Loading => &self.loading,
        }
    }

    fn merged(&self, partial: &PartialColorScheme) -> Self {
        Self {
            success: self.success.merged(partial.success.as_ref()),
            error: self.error.merged(partial.error.as_ref()),
            info: self.info.merged(partial.info.as_ref()),
            loading: self.loading.merged(partial.loading.as_ref()),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            success: TypeColors::new(SUCCESS_ACCENT, TOAST_BACKGROUND),
            error: TypeColors::new(ERROR_ACCENT, TOAST_BACKGROUND),
            info: TypeColors::new(INFO_ACCENT, TOAST_BACKGROUND),
            loading: TypeColors::new(LOADING_ACCENT, TOAST_BACKGROUND),
        }
    }
}

/// Per-type icon overrides. Unset entries use the built-in icon.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    pub success: Option<Renderable>,
    pub error: Option<Renderable>,
    pub info: Option<Renderable>,
    pub loading: Option<Renderable>,
}

impl IconSet {
    /// Returns the override for the given toast type, if any.
    #[must_use]
    pub fn get(&self, toast_type: ToastType) -> Option<&Renderable> {
        match toast_type {
            ToastType::Success => self.success.as_ref(),
            ToastType::Error => self.error.as_ref(),
            ToastType::Info => self.info.as_ref(),
            ToastType::Loading => self.loading.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, toast_type: ToastType) -> &mut Option<Renderable> {
        match toast_type {
            ToastType::Success => &mut self.success,
            ToastType::Error => &mut self.error,
            ToastType::Info => &mut self.info,
            ToastType::Loading => &mut self.loading,
        }
    }

    fn merged(&self, over: &IconSet) -> Self {
        Self {
            success: over.success.clone().or_else(|| self.success.clone()),
            error: over.error.clone().or_else(|| self.error.clone()),
            info: over.info.clone().or_else(|| self.info.clone()),
            loading: over.loading.clone().or_else(|| self.loading.clone()),
        }
    }
}

/// A fully resolved toast theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub position: Position,
    /// Extra distance from the anchored screen edge.
    pub offset: f32,
    pub stacking: bool,
    pub max_visible: MaxVisible,
    pub dismissible: bool,
    pub show_close_button: bool,
    pub rtl: bool,
    pub colors: ColorScheme,
    pub icons: IconSet,
    pub toast_style: Style,
    pub title_style: Style,
    pub description_style: Style,
    pub default_duration: Duration,
}

impl Theme {
    /// Maximum number of simultaneously active toasts under this theme.
    #[must_use]
    pub fn effective_cap(&self) -> usize {
        if self.stacking {
            self.max_visible.value()
        } else {
            1
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            position: Position::Top,
            offset: 0.0,
            stacking: true,
            max_visible: MaxVisible::default(),
            dismissible: true,
            show_close_button: true,
            rtl: false,
            colors: ColorScheme::default(),
            icons: IconSet::default(),
            toast_style: Style::default(),
            title_style: Style::default(),
            description_style: Style::default(),
            default_duration: DEFAULT_DURATION,
        }
    }
}

/// Resolves a partial configuration into a complete theme.
///
/// Always returns a fresh snapshot and never modifies `config`.
#[must_use]
pub fn resolve(config: Option<&ToastConfig>) -> Theme {
    let defaults = Theme::default();
    let Some(config) = config else {
        return defaults;
    };

    let colors = match &config.colors {
        Some(partial) => defaults.colors.merged(partial),
        None => defaults.colors.clone(),
    };

    let merge_style = |base: &Style, over: &Option<Style>| match over {
        Some(over) => base.merged(over),
        None => base.clone(),
    };

    Theme {
        position: config.position.unwrap_or(defaults.position),
        offset: config.offset.unwrap_or(defaults.offset),
        stacking: config.stacking.unwrap_or(defaults.stacking),
        max_visible: config
            .max_visible
            .map_or(defaults.max_visible, MaxVisible::new),
        dismissible: config.dismissible.unwrap_or(defaults.dismissible),
        show_close_button: config
            .show_close_button
            .unwrap_or(defaults.show_close_button),
        rtl: config.rtl.unwrap_or(defaults.rtl),
        colors,
        icons: defaults.icons.merged(&config.icons),
        toast_style: merge_style(&defaults.toast_style, &config.toast_style),
        title_style: merge_style(&defaults.title_style, &config.title_style),
        description_style: merge_style(&defaults.description_style, &config.description_style),
        default_duration: config
            .default_duration_ms
            .filter(|ms| *ms > 0)
            .map_or(defaults.default_duration, Duration::from_millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_config_returns_defaults() {
        let theme = resolve(None);
        assert_eq!(theme.position, Position::Top);
        assert!(theme.stacking);
        assert_eq!(theme.effective_cap(), 3);
        assert_eq!(theme.default_duration, Duration::from_millis(4_000));
        assert_eq!(theme.colors, ColorScheme::default());
    }

    #[test]
    fn partial_type_colors_keep_remaining_defaults() {
        let config = ToastConfig::default().accent(ToastType::Success, "#fff");
        let theme = resolve(Some(&config));

        assert_eq!(theme.colors.success.accent, "#fff");
        assert_eq!(theme.colors.success.background, TOAST_BACKGROUND);
        assert_eq!(theme.colors.error, ColorScheme::default().error);
        assert_eq!(theme.colors.info, ColorScheme::default().info);
        assert_eq!(theme.colors.loading, ColorScheme::default().loading);
    }

    #[test]
    fn resolve_does_not_mutate_config() {
        let config = ToastConfig::default()
            .background(ToastType::Error, "#000")
            .stacking(false);
        let before = format!("{config:?}");
        let _ = resolve(Some(&config));
        assert_eq!(format!("{config:?}"), before);
    }

    #[test]
    fn stacking_disabled_caps_at_one() {
        let theme = resolve(Some(&ToastConfig::default().stacking(false).max_visible(5)));
        assert_eq!(theme.effective_cap(), 1);
    }

    #[test]
    fn max_visible_is_clamped() {
        assert_eq!(MaxVisible::new(0).value(), MIN_MAX_VISIBLE);
        assert_eq!(MaxVisible::new(100).value(), MAX_MAX_VISIBLE);
        let theme = resolve(Some(&ToastConfig::default().max_visible(5)));
        assert_eq!(theme.effective_cap(), 5);
    }

    #[test]
    fn zero_default_duration_falls_back() {
        let config = ToastConfig {
            default_duration_ms: Some(0),
            ..ToastConfig::default()
        };
        assert_eq!(resolve(Some(&config)).default_duration, DEFAULT_DURATION);
    }

    #[test]
    fn style_overrides_are_merged_over_defaults() {
        let config = ToastConfig {
            title_style: Some(Style {
                font_size: Some(18.0),
                ..Style::default()
            }),
            ..ToastConfig::default()
        };
        let theme = resolve(Some(&config));
        assert_eq!(theme.title_style.font_size, Some(18.0));
        assert!(theme.toast_style.is_empty());
        assert!(theme.description_style.is_empty());
    }

    #[test]
    fn icon_overrides_apply_per_type() {
        let config = ToastConfig::default().icon(ToastType::Info, Renderable::new("info-glyph"));
        let theme = resolve(Some(&config));
        let icon = theme.icons.get(ToastType::Info).expect("icon set");
        assert_eq!(icon.downcast_ref::<&str>(), Some(&"info-glyph"));
        assert!(theme.icons.get(ToastType::Success).is_none());
    }
}
