// SPDX-License-Identifier: MPL-2.0
//! Hex color values as written in configuration.

use iced_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color written as a CSS-style hex string (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`).
///
/// The configured text is kept verbatim so that a resolved theme reports
/// exactly what the user wrote; [`HexColor::to_color`] converts on demand.
///
/// ```
/// use bread::theme::HexColor;
///
/// let accent = HexColor::from("#fff");
/// assert_eq!(accent, "#fff");
/// assert!(accent.to_color().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Wraps a hex string without validating it.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the configured text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the hex string into a color.
    ///
    /// Returns `None` when the text is not a well-formed hex color.
    #[must_use]
    pub fn to_color(&self) -> Option<Color> {
        let digits = self.0.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }

        let short = |i: usize| -> Option<u8> {
            u8::from_str_radix(&digits[i..=i], 16).ok().map(|v| v * 17)
        };
        let long = |i: usize| -> Option<u8> { u8::from_str_radix(&digits[i..i + 2], 16).ok() };

        let (r, g, b, a) = match digits.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            4 => (short(0)?, short(1)?, short(2)?, short(3)?),
            6 => (long(0)?, long(2)?, long(4)?, 255),
            8 => (long(0)?, long(2)?, long(4)?, long(6)?),
            _ => return None,
        };

        Some(Color::from_rgba8(r, g, b, f32::from(a) / 255.0))
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HexColor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for HexColor {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
