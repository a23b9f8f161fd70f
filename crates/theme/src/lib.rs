//! # Claudia Theme
//!
//! Named themes mapped onto a fixed set of color roles, the custom theme
//! composer, and the [`ThemeManager`] service that applies, persists and
//! announces the current selection.

pub mod catalog;
pub mod color;
pub mod custom;
pub mod manager;
pub mod role;

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use claudia_core::Event;

pub use catalog::{BackgroundTheme, BackgroundVariant, ThemeColor};
pub use custom::compose_custom_colors;
pub use manager::ThemeManager;
pub use role::{ColorOverrides, ColorRole, ColorRoleMap};

/// Theme error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("Unknown color role: {0}")]
    UnknownRole(String),
    #[error("Invalid color for '{role}': {value}")]
    InvalidColor { role: ColorRole, value: String },
}

/// Theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    #[default]
    Light,
    Custom,
}

impl ThemeName {
    /// All themes in declaration order
    pub const ALL: [ThemeName; 3] = [Self::Dark, Self::Light, Self::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "custom" => Ok(Self::Custom),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

/// Complete theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeName,
    pub name: String,
    pub description: String,
    pub colors: ColorRoleMap,
}

/// Emitted after every theme mutation, changed or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChanged {
    pub theme: ThemeName,
}

impl Event for ThemeChanged {
    fn name(&self) -> &'static str { "theme.changed" }
}
