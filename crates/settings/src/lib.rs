//! # Claudia Settings
//!
//! Access to the assistant's `settings.json` and the model behind the
//! settings panel: permission rules, environment variables, general
//! options, installation selection, plus the theme and zoom controls.

pub mod api;
pub mod draft;
pub mod jsonc;
pub mod panel;

use serde_json::{Map, Value};

use claudia_core::StoreError;

pub use api::{FileSettingsApi, SettingsApi, BINARY_PATH_KEY};
pub use draft::{EnvField, EnvVar, PermissionRule, RowId, RuleKind, SettingsDraft};
pub use panel::{SettingsPanel, Toast, ToastKind, LOAD_ERROR, SAVE_ERROR};

/// Opaque settings document, always a JSON object
pub type SettingsBlob = Map<String, Value>;

/// Settings error
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
