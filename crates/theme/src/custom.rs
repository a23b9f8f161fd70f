//! Custom theme composition

use crate::catalog::{BackgroundTheme, BackgroundVariant, ThemeColor, DESTRUCTIVE};
use crate::role::{ColorOverrides, ColorRole};

/// Build a full role map from an accent color and a background palette
///
/// `primary-foreground` takes the background color on dark palettes and
/// the foreground color on light ones, so text on the accent surface
/// stays readable.
pub fn compose_custom_colors(accent: &ThemeColor, background: &BackgroundTheme) -> ColorOverrides {
    let primary_foreground = match background.variant {
        BackgroundVariant::Dark => &background.background,
        BackgroundVariant::Light => &background.foreground,
    };

    [
        (ColorRole::Primary, &accent.primary),
        (ColorRole::Background, &background.background),
        (ColorRole::Foreground, &background.foreground),
        (ColorRole::Card, &background.card),
        (ColorRole::CardForeground, &background.card_foreground),
        (ColorRole::Popover, &background.card),
        (ColorRole::PopoverForeground, &background.card_foreground),
        (ColorRole::PrimaryForeground, primary_foreground),
        (ColorRole::Secondary, &background.secondary),
        (ColorRole::SecondaryForeground, &background.foreground),
        (ColorRole::Muted, &background.muted),
        (ColorRole::MutedForeground, &background.muted_foreground),
        (ColorRole::Accent, &background.accent),
        (ColorRole::AccentForeground, &background.foreground),
        (ColorRole::Border, &background.border),
        (ColorRole::Input, &background.input),
        (ColorRole::Ring, &accent.primary),
        (ColorRole::DestructiveForeground, &background.foreground),
    ]
    .into_iter()
    .map(|(role, value)| (role, value.clone()))
    .chain(std::iter::once((ColorRole::Destructive, DESTRUCTIVE.to_string())))
    .collect()
}
