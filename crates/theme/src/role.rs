//! Color roles
//!
//! A role is a named semantic slot that components reference instead of a
//! literal color. Each role is published as the `--color-<role>` property.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ThemeError;

/// Semantic color slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorRole {
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,
    Destructive,
    DestructiveForeground,
    Border,
    Input,
    Ring,
}

impl ColorRole {
    /// All roles in declaration order
    pub const ALL: [ColorRole; 19] = [
        Self::Background,
        Self::Foreground,
        Self::Card,
        Self::CardForeground,
        Self::Popover,
        Self::PopoverForeground,
        Self::Primary,
        Self::PrimaryForeground,
        Self::Secondary,
        Self::SecondaryForeground,
        Self::Muted,
        Self::MutedForeground,
        Self::Accent,
        Self::AccentForeground,
        Self::Destructive,
        Self::DestructiveForeground,
        Self::Border,
        Self::Input,
        Self::Ring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::CardForeground => "card-foreground",
            Self::Popover => "popover",
            Self::PopoverForeground => "popover-foreground",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primary-foreground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondary-foreground",
            Self::Muted => "muted",
            Self::MutedForeground => "muted-foreground",
            Self::Accent => "accent",
            Self::AccentForeground => "accent-foreground",
            Self::Destructive => "destructive",
            Self::DestructiveForeground => "destructive-foreground",
            Self::Border => "border",
            Self::Input => "input",
            Self::Ring => "ring",
        }
    }

    /// Presentation property this role is published as
    pub fn property_name(&self) -> String {
        format!("--color-{}", self.as_str())
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ThemeError::UnknownRole(s.to_string()))
    }
}

/// Partial role map, merged onto a full one
pub type ColorOverrides = BTreeMap<ColorRole, String>;

/// A value for every color role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ColorRoleMap {
    pub background: String,
    pub foreground: String,
    pub card: String,
    pub card_foreground: String,
    pub popover: String,
    pub popover_foreground: String,
    pub primary: String,
    pub primary_foreground: String,
    pub secondary: String,
    pub secondary_foreground: String,
    pub muted: String,
    pub muted_foreground: String,
    pub accent: String,
    pub accent_foreground: String,
    pub destructive: String,
    pub destructive_foreground: String,
    pub border: String,
    pub input: String,
    pub ring: String,
}

impl ColorRoleMap {
    pub fn get(&self, role: ColorRole) -> &str {
        self.slot(role)
    }

    pub fn set(&mut self, role: ColorRole, value: impl Into<String>) {
        *self.slot_mut(role) = value.into();
    }

    /// Overwrite the roles present in `overrides`, keep the rest
    pub fn apply(&mut self, overrides: &ColorOverrides) {
        for (role, value) in overrides {
            self.set(*role, value.clone());
        }
    }

    /// Roles and values in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, &str)> + '_ {
        ColorRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }

    fn slot(&self, role: ColorRole) -> &String {
        match role {
            ColorRole::Background => &self.background,
            ColorRole::Foreground => &self.foreground,
            ColorRole::Card => &self.card,
            ColorRole::CardForeground => &self.card_foreground,
            ColorRole::Popover => &self.popover,
            ColorRole::PopoverForeground => &self.popover_foreground,
            ColorRole::Primary => &self.primary,
            ColorRole::PrimaryForeground => &self.primary_foreground,
            ColorRole::Secondary => &self.secondary,
            ColorRole::SecondaryForeground => &self.secondary_foreground,
            ColorRole::Muted => &self.muted,
            ColorRole::MutedForeground => &self.muted_foreground,
            ColorRole::Accent => &self.accent,
            ColorRole::AccentForeground => &self.accent_foreground,
            ColorRole::Destructive => &self.destructive,
            ColorRole::DestructiveForeground => &self.destructive_foreground,
            ColorRole::Border => &self.border,
            ColorRole::Input => &self.input,
            ColorRole::Ring => &self.ring,
        }
    }

    fn slot_mut(&mut self, role: ColorRole) -> &mut String {
        match role {
            ColorRole::Background => &mut self.background,
            ColorRole::Foreground => &mut self.foreground,
            ColorRole::Card => &mut self.card,
            ColorRole::CardForeground => &mut self.card_foreground,
            ColorRole::Popover => &mut self.popover,
            ColorRole::PopoverForeground => &mut self.popover_foreground,
            ColorRole::Primary => &mut self.primary,
            ColorRole::PrimaryForeground => &mut self.primary_foreground,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::SecondaryForeground => &mut self.secondary_foreground,
            ColorRole::Muted => &mut self.muted,
            ColorRole::MutedForeground => &mut self.muted_foreground,
            ColorRole::Accent => &mut self.accent,
            ColorRole::AccentForeground => &mut self.accent_foreground,
            ColorRole::Destructive => &mut self.destructive,
            ColorRole::DestructiveForeground => &mut self.destructive_foreground,
            ColorRole::Border => &mut self.border,
            ColorRole::Input => &mut self.input,
            ColorRole::Ring => &mut self.ring,
        }
    }
}
