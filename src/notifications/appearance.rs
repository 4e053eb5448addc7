// SPDX-License-Identifier: MPL-2.0
//! Presentation-ready view of a toast.
//!
//! The store only tracks records; this module answers the questions a
//! renderer asks about them: which colors, which icon, whether a close
//! button is drawn, and in which order the stack is painted.

use super::toast::{Renderable, Toast, ToastId, ToastState, ToastType};
use crate::theme::{HexColor, Position, Style, Theme};
use iced_core::Color;

/// Where a toast's icon comes from.
#[derive(Debug, Clone)]
pub enum IconSource {
    /// Set on the toast itself.
    Custom(Renderable),
    /// Set in the theme for the toast's type.
    Themed(Renderable),
    /// No override; draw the built-in icon for this type.
    Builtin(ToastType),
}

/// Everything needed to draw one toast, resolved against a theme.
#[derive(Debug, Clone)]
pub struct Appearance {
    pub accent: HexColor,
    pub background: HexColor,
    pub icon: IconSource,
    pub show_close_button: bool,
    pub dismissible: bool,
    pub toast_style: Style,
    pub title_style: Style,
    pub description_style: Style,
    pub position: Position,
    pub offset: f32,
    pub rtl: bool,
}

impl Appearance {
    /// Resolves the look of `toast` under `theme`. Toast options win over the theme.
    #[must_use]
    pub fn resolve(toast: &Toast, theme: &Theme) -> Self {
        let colors = theme.colors.get(toast.toast_type);
        let options = toast.options.as_ref();

        let icon = match (options.and_then(|o| o.icon.clone()), theme.icons.get(toast.toast_type)) {
            (Some(icon), _) => IconSource::Custom(icon),
            (None, Some(icon)) => IconSource::Themed(icon.clone()),
            (None, None) => IconSource::Builtin(toast.toast_type),
        };

        let show_close_button = toast.toast_type != ToastType::Loading
            && options
                .and_then(|o| o.show_close_button)
                .unwrap_or(theme.show_close_button);

        let layered = |base: &Style, over: Option<&Style>| match over {
            Some(over) => base.merged(over),
            None => base.clone(),
        };

        Self {
            accent: colors.accent.clone(),
            background: colors.background.clone(),
            icon,
            show_close_button,
            dismissible: is_dismissible(toast, theme),
            toast_style: layered(&theme.toast_style, options.and_then(|o| o.style.as_ref())),
            title_style: layered(&theme.title_style, options.and_then(|o| o.title_style.as_ref())),
            description_style: layered(
                &theme.description_style,
                options.and_then(|o| o.description_style.as_ref()),
            ),
            position: theme.position,
            offset: theme.offset,
            rtl: theme.rtl,
        }
    }

    /// Accent as a renderable color. Unparseable values fall back to black.
    #[must_use]
    pub fn accent_color(&self) -> Color {
        self.accent.to_color().unwrap_or(Color::BLACK)
    }

    /// Background as a renderable color. Unparseable values fall back to white.
    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background.to_color().unwrap_or(Color::WHITE)
    }
}

fn is_dismissible(toast: &Toast, theme: &Theme) -> bool {
    toast
        .options
        .as_ref()
        .and_then(|o| o.dismissible)
        .unwrap_or(theme.dismissible)
}

/// One entry of the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSlot {
    pub id: ToastId,
    /// Depth in the stack (0 = front). `None` while exiting.
    pub index: Option<usize>,
}

/// Returns the toasts in paint order: back first, front last.
///
/// Exiting toasts keep their place in the order but take no stack depth, so
/// the remaining toasts close the gap while they animate out.
#[must_use]
pub fn stack_layout(state: &ToastState) -> Vec<StackSlot> {
    let mut depth = 0;
    let mut slots: Vec<StackSlot> = state
        .visible_toasts()
        .iter()
        .map(|toast| {
            let index = (!toast.is_exiting()).then(|| {
                depth += 1;
                depth - 1
            });
            StackSlot {
                id: toast.id(),
                index,
            }
        })
        .collect();
    slots.reverse();
    slots
}

/// Whether the front active toast can be dismissed by the user.
///
/// Falls back to the theme when nothing is active.
#[must_use]
pub fn front_dismissible(state: &ToastState, theme: &Theme) -> bool {
    state
        .active()
        .next()
        .map_or(theme.dismissible, |toast| is_dismissible(toast, theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToastConfig;
    use crate::notifications::ToastOptions;
    use crate::theme;
    use std::time::Duration;

    fn toast(raw: u64, toast_type: ToastType, options: Option<ToastOptions>) -> Toast {
        Toast::new(
            ToastId::from_raw(raw),
            "title".into(),
            None,
            toast_type,
            Duration::from_secs(4),
            options,
        )
    }

    #[test]
    fn colors_follow_type() {
        let theme = Theme::default();
        let appearance = Appearance::resolve(&toast(1, ToastType::Error, None), &theme);
        assert_eq!(appearance.accent, "#F05964");
        assert_eq!(appearance.background, "#FFFFFF");
        let color = appearance.accent_color();
        assert!((color.r - 240.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn loading_never_shows_close_button() {
        let theme = Theme::default();
        let forced = ToastOptions::default().show_close_button(true);
        let appearance = Appearance::resolve(&toast(1, ToastType::Loading, Some(forced)), &theme);
        assert!(!appearance.show_close_button);

        let appearance = Appearance::resolve(&toast(2, ToastType::Info, None), &theme);
        assert!(appearance.show_close_button);
    }

    #[test]
    fn icon_prefers_toast_then_theme_then_builtin() {
        let config = ToastConfig::default().icon(ToastType::Info, Renderable::new("themed"));
        let theme = theme::resolve(Some(&config));

        let own = ToastOptions::default().icon(Renderable::new("own"));
        let appearance = Appearance::resolve(&toast(1, ToastType::Info, Some(own)), &theme);
        assert!(matches!(appearance.icon, IconSource::Custom(ref r) if r.downcast_ref::<&str>() == Some(&"own")));

        let appearance = Appearance::resolve(&toast(2, ToastType::Info, None), &theme);
        assert!(matches!(appearance.icon, IconSource::Themed(_)));

        let appearance = Appearance::resolve(&toast(3, ToastType::Success, None), &theme);
        assert!(matches!(appearance.icon, IconSource::Builtin(ToastType::Success)));
    }

    #[test]
    fn toast_style_layers_over_theme() {
        let mut theme = Theme::default();
        theme.toast_style.border_radius = Some(12.0);
        theme.toast_style.padding = Some(8.0);
        let options = ToastOptions::default().style(Style {
            padding: Some(2.0),
            ..Style::default()
        });

        let appearance = Appearance::resolve(&toast(1, ToastType::Success, Some(options)), &theme);
        assert_eq!(appearance.toast_style.border_radius, Some(12.0));
        assert_eq!(appearance.toast_style.padding, Some(2.0));
    }

    #[test]
    fn layout_paints_back_to_front_and_skips_exiting_depth() {
        let mut exiting = toast(2, ToastType::Info, None);
        exiting.mark_exiting();
        let state = ToastState::new(vec![
            toast(3, ToastType::Info, None),
            exiting,
            toast(1, ToastType::Info, None),
        ]);

        let layout = stack_layout(&state);
        let id = ToastId::from_raw;
        assert_eq!(
            layout,
            vec![
                StackSlot { id: id(1), index: Some(1) },
                StackSlot { id: id(2), index: None },
                StackSlot { id: id(3), index: Some(0) },
            ]
        );
    }

    #[test]
    fn front_dismissible_reads_first_active_toast() {
        let theme = Theme::default();
        let mut exiting = toast(1, ToastType::Info, Some(ToastOptions::default().dismissible(true)));
        exiting.mark_exiting();
        let locked = toast(2, ToastType::Info, Some(ToastOptions::default().dismissible(false)));
        let state = ToastState::new(vec![exiting, locked]);
        assert!(!front_dismissible(&state, &theme));
        assert!(front_dismissible(&ToastState::default(), &theme));
    }
}
