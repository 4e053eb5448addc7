// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast configuration, including loading and saving
//! it to a `toasts.toml` file.
//!
//! A [`ToastConfig`] is a partial mirror of [`Theme`](crate::theme::Theme):
//! every field is optional and unset fields resolve to the defaults in
//! [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use bread::config::{self, ToastConfig};
//! use bread::theme::Position;
//!
//! // Load existing configuration
//! let config = config::load();
//!
//! // Modify a setting
//! let config = config.position(Position::Bottom);
//!
//! // To load/save from a specific path (e.g., for testing)
//! let path = std::path::PathBuf::from("./temp_config_dir/toasts.toml");
//! config::save_to_path(&config, &path).expect("Failed to save to path");
//! let loaded = config::load_from_path(&path).expect("Failed to load from path");
//! assert_eq!(loaded.position, Some(Position::Bottom));
//! ```

pub mod defaults;

use crate::error::Result;
use crate::notifications::{Renderable, ToastType};
use crate::theme::{HexColor, IconSet, Position, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toasts.toml";
const APP_NAME: &str = "Bread";

/// Partial accent/background pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialTypeColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<HexColor>,
}

/// Partial per-type colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialColorScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<PartialTypeColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PartialTypeColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<PartialTypeColors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<PartialTypeColors>,
}

impl PartialColorScheme {
    fn slot_mut(&mut self, toast_type: ToastType) -> &mut PartialTypeColors {
        let slot = match toast_type {
            ToastType::Success => &mut self.success,
            ToastType::Error => &mut self.error,
            ToastType::Info => &mut self.info,
            ToastType::Loading => &mut self.loading,
        };
        slot.get_or_insert_with(PartialTypeColors::default)
    }
}

/// User-supplied toast configuration.
///
/// Icons are runtime handles and are never written to or read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_close_button: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<PartialColorScheme>,
    #[serde(skip)]
    pub icons: IconSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast_style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_style: Option<Style>,
}

impl ToastConfig {
    /// Sets the anchored screen edge.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Enables or disables stacking.
    #[must_use]
    pub fn stacking(mut self, stacking: bool) -> Self {
        self.stacking = Some(stacking);
        self
    }

    /// Sets the maximum number of stacked toasts.
    #[must_use]
    pub fn max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = Some(max_visible);
        self
    }

    /// Sets the default auto-dismiss duration.
    #[must_use]
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Overrides the accent color of one toast type.
    #[must_use]
    pub fn accent(mut self, toast_type: ToastType, color: impl Into<HexColor>) -> Self {
        self.colors
            .get_or_insert_with(PartialColorScheme::default)
            .slot_mut(toast_type)
            .accent = Some(color.into());
        self
    }

    /// Overrides the background color of one toast type.
    #[must_use]
    pub fn background(mut self, toast_type: ToastType, color: impl Into<HexColor>) -> Self {
        self.colors
            .get_or_insert_with(PartialColorScheme::default)
            .slot_mut(toast_type)
            .background = Some(color.into());
        self
    }

    /// Overrides the icon of one toast type.
    #[must_use]
    pub fn icon(mut self, toast_type: ToastType, icon: Renderable) -> Self {
        *self.icons.slot_mut(toast_type) = Some(icon);
        self
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// A missing or unreadable file yields the default (empty) configuration.
#[must_use]
pub fn load() -> ToastConfig {
    let Some(path) = get_default_config_path() else {
        return ToastConfig::default();
    };
    if !path.exists() {
        return ToastConfig::default();
    }
    match load_from_path(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable toast config");
            ToastConfig::default()
        }
    }
}

/// Saves the configuration to the default location.
pub fn save(config: &ToastConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<ToastConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &ToastConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
