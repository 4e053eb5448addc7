// SPDX-License-Identifier: MPL-2.0
//! Style override bags for toast containers and text.

use super::HexColor;
use serde::{Deserialize, Serialize};

/// A partial set of visual properties.
///
/// Every field is optional; a style only shadows the properties it sets.
/// Themes carry one for the container, the title and the description, and
/// each toast may carry its own to override the theme for that toast alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<HexColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Style {
    /// Returns a new style with `over`'s properties layered on top of `self`.
    #[must_use]
    pub fn merged(&self, over: &Style) -> Style {
        Style {
            background_color: over
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            border_color: over
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            border_width: over.border_width.or(self.border_width),
            border_radius: over.border_radius.or(self.border_radius),
            padding: over.padding.or(self.padding),
            color: over.color.clone().or_else(|| self.color.clone()),
            font_size: over.font_size.or(self.font_size),
            opacity: over.opacity.or(self.opacity),
        }
    }

    /// Returns whether no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_prefers_overriding_properties() {
        let base = Style {
            border_radius: Some(8.0),
            padding: Some(12.0),
            ..Style::default()
        };
        let over = Style {
            padding: Some(4.0),
            color: Some("#000".into()),
            ..Style::default()
        };

        let merged = base.merged(&over);
        assert_eq!(merged.border_radius, Some(8.0));
        assert_eq!(merged.padding, Some(4.0));
        assert_eq!(merged.color, Some(HexColor::from("#000")));
    }

    #[test]
    fn merged_does_not_touch_inputs() {
        let base = Style {
            opacity: Some(0.5),
            ..Style::default()
        };
        let _ = base.merged(&Style {
            opacity: Some(1.0),
            ..Style::default()
        });
        assert_eq!(base.opacity, Some(0.5));
    }

    #[test]
    fn default_style_is_empty() {
        assert!(Style::default().is_empty());
        assert!(!Style {
            font_size: Some(14.0),
            ..Style::default()
        }
        .is_empty());
    }
}
