//! Built-in theme catalog
//!
//! Static data only: the `dark` and `light` themes, the template the
//! custom theme starts from, the preset accent colors and the background
//! palettes a custom theme is composed from. Nothing here is ever mutated.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::role::ColorRoleMap;
use crate::{Theme, ThemeName};

/// Accent color offered when building a custom theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor {
    pub name: String,
    /// Color expression used for `primary` and `ring`
    pub primary: String,
    /// Hue of the accent, kept for palette generation
    pub hue: u16,
}

impl ThemeColor {
    fn preset(name: &str, primary: &str, hue: u16) -> Self {
        Self {
            name: name.to_string(),
            primary: primary.to_string(),
            hue,
        }
    }
}

/// Light or dark background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundVariant {
    Dark,
    Light,
}

/// Background and neutral palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTheme {
    pub name: String,
    #[serde(rename = "key")]
    pub variant: BackgroundVariant,
    pub background: String,
    pub foreground: String,
    pub card: String,
    pub card_foreground: String,
    pub secondary: String,
    pub muted: String,
    pub muted_foreground: String,
    pub accent: String,
    pub border: String,
    pub input: String,
}

/// Alert color shared by every theme
pub const DESTRUCTIVE: &str = "oklch(0.6 0.2 25)";

static PRESET_COLORS: Lazy<Vec<ThemeColor>> = Lazy::new(|| {
    vec![
        ThemeColor::preset("Blue", "oklch(0.5 0.15 250)", 250),
        ThemeColor::preset("Green", "oklch(0.5 0.15 130)", 130),
        ThemeColor::preset("Purple", "oklch(0.5 0.15 290)", 290),
        ThemeColor::preset("Red", "oklch(0.5 0.15 20)", 20),
        ThemeColor::preset("Orange", "oklch(0.6 0.15 50)", 50),
        ThemeColor::preset("Pink", "oklch(0.6 0.15 330)", 330),
        ThemeColor::preset("Cyan", "oklch(0.5 0.15 190)", 190),
        ThemeColor::preset("Yellow", "oklch(0.7 0.15 80)", 80),
        ThemeColor::preset("Indigo", "oklch(0.5 0.15 270)", 270),
        ThemeColor::preset("Teal", "oklch(0.5 0.15 170)", 170),
        ThemeColor::preset("Emerald", "oklch(0.5 0.15 160)", 160),
        ThemeColor::preset("Rose", "oklch(0.6 0.15 350)", 350),
        ThemeColor::preset("Amber", "oklch(0.7 0.15 70)", 70),
        ThemeColor::preset("Lime", "oklch(0.6 0.15 110)", 110),
        ThemeColor::preset("Violet", "oklch(0.5 0.15 280)", 280),
        ThemeColor::preset("Sky", "oklch(0.5 0.15 210)", 210),
        ThemeColor::preset("Slate", "oklch(0.5 0.05 240)", 240),
        ThemeColor::preset("Gray", "oklch(0.5 0.0 0)", 0),
        ThemeColor::preset("Zinc", "oklch(0.5 0.01 240)", 240),
        ThemeColor::preset("Stone", "oklch(0.5 0.02 60)", 60),
    ]
});

static BACKGROUND_THEMES: Lazy<Vec<BackgroundTheme>> = Lazy::new(|| {
    vec![
        BackgroundTheme {
            name: "Dark".into(),
            variant: BackgroundVariant::Dark,
            background: "oklch(0.12 0.01 240)".into(),
            foreground: "oklch(0.98 0.01 240)".into(),
            card: "oklch(0.14 0.01 240)".into(),
            card_foreground: "oklch(0.98 0.01 240)".into(),
            secondary: "oklch(0.16 0.01 240)".into(),
            muted: "oklch(0.16 0.01 240)".into(),
            muted_foreground: "oklch(0.68 0.01 240)".into(),
            accent: "oklch(0.16 0.01 240)".into(),
            border: "oklch(0.16 0.01 240)".into(),
            input: "oklch(0.16 0.01 240)".into(),
        },
        BackgroundTheme {
            name: "Light".into(),
            variant: BackgroundVariant::Light,
            background: "oklch(0.98 0.01 240)".into(),
            foreground: "oklch(0.12 0.01 240)".into(),
            card: "oklch(1.0 0.0 0)".into(),
            card_foreground: "oklch(0.12 0.01 240)".into(),
            secondary: "oklch(0.95 0.01 240)".into(),
            muted: "oklch(0.95 0.01 240)".into(),
            muted_foreground: "oklch(0.45 0.01 240)".into(),
            accent: "oklch(0.95 0.01 240)".into(),
            border: "oklch(0.88 0.01 240)".into(),
            input: "oklch(0.95 0.01 240)".into(),
        },
    ]
});

static DARK: Lazy<Theme> = Lazy::new(|| Theme {
    id: ThemeName::Dark,
    name: "Dark Theme".into(),
    description: "Classic dark theme (current default)".into(),
    colors: dark_colors(),
});

static LIGHT: Lazy<Theme> = Lazy::new(|| Theme {
    id: ThemeName::Light,
    name: "Light Theme".into(),
    description: "Clean and bright light theme".into(),
    colors: ColorRoleMap {
        background: "oklch(0.98 0.01 240)".into(),
        foreground: "oklch(0.12 0.01 240)".into(),
        card: "oklch(1.0 0.0 0)".into(),
        card_foreground: "oklch(0.12 0.01 240)".into(),
        popover: "oklch(1.0 0.0 0)".into(),
        popover_foreground: "oklch(0.12 0.01 240)".into(),
        primary: "oklch(0.12 0.01 240)".into(),
        primary_foreground: "oklch(0.98 0.01 240)".into(),
        secondary: "oklch(0.95 0.01 240)".into(),
        secondary_foreground: "oklch(0.12 0.01 240)".into(),
        muted: "oklch(0.95 0.01 240)".into(),
        muted_foreground: "oklch(0.45 0.01 240)".into(),
        accent: "oklch(0.95 0.01 240)".into(),
        accent_foreground: "oklch(0.12 0.01 240)".into(),
        destructive: DESTRUCTIVE.into(),
        destructive_foreground: "oklch(0.98 0.01 240)".into(),
        border: "oklch(0.88 0.01 240)".into(),
        input: "oklch(0.95 0.01 240)".into(),
        ring: "oklch(0.52 0.015 240)".into(),
    },
});

// The custom theme starts out identical to dark.
static CUSTOM_TEMPLATE: Lazy<Theme> = Lazy::new(|| Theme {
    id: ThemeName::Custom,
    name: "Custom Theme".into(),
    description: "User-defined personalized theme".into(),
    colors: dark_colors(),
});

fn dark_colors() -> ColorRoleMap {
    ColorRoleMap {
        background: "oklch(0.12 0.01 240)".into(),
        foreground: "oklch(0.98 0.01 240)".into(),
        card: "oklch(0.14 0.01 240)".into(),
        card_foreground: "oklch(0.98 0.01 240)".into(),
        popover: "oklch(0.12 0.01 240)".into(),
        popover_foreground: "oklch(0.98 0.01 240)".into(),
        primary: "oklch(0.98 0.01 240)".into(),
        primary_foreground: "oklch(0.17 0.01 240)".into(),
        secondary: "oklch(0.16 0.01 240)".into(),
        secondary_foreground: "oklch(0.98 0.01 240)".into(),
        muted: "oklch(0.16 0.01 240)".into(),
        muted_foreground: "oklch(0.68 0.01 240)".into(),
        accent: "oklch(0.16 0.01 240)".into(),
        accent_foreground: "oklch(0.98 0.01 240)".into(),
        destructive: DESTRUCTIVE.into(),
        destructive_foreground: "oklch(0.98 0.01 240)".into(),
        border: "oklch(0.16 0.01 240)".into(),
        input: "oklch(0.16 0.01 240)".into(),
        ring: "oklch(0.52 0.015 240)".into(),
    }
}

/// Preset accent colors, in display order
pub fn preset_colors() -> &'static [ThemeColor] {
    &PRESET_COLORS
}

/// Background palettes, in display order
pub fn background_themes() -> &'static [BackgroundTheme] {
    &BACKGROUND_THEMES
}

/// Find a preset accent by name (case-insensitive)
pub fn preset_color(name: &str) -> Option<&'static ThemeColor> {
    PRESET_COLORS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Find a background palette by name (case-insensitive)
pub fn background_theme(name: &str) -> Option<&'static BackgroundTheme> {
    BACKGROUND_THEMES.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

pub fn dark() -> Theme {
    DARK.clone()
}

pub fn light() -> Theme {
    LIGHT.clone()
}

/// The custom theme before any user overrides
pub fn custom_template() -> Theme {
    CUSTOM_TEMPLATE.clone()
}
