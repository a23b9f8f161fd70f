//! Settings persistence API

use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use claudia_core::{AppConfig, KeyValueStore};

use crate::jsonc::strip_comments;
use crate::{SettingsBlob, SettingsError};

/// Store key holding the selected assistant binary
pub const BINARY_PATH_KEY: &str = "binary-path";

/// Backend the settings panel reads from and writes to
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// Read the whole settings document
    async fn get_settings(&self) -> Result<SettingsBlob, SettingsError>;

    /// Replace the whole settings document
    async fn save_settings(&self, settings: SettingsBlob) -> Result<(), SettingsError>;

    /// Currently selected binary, if any
    async fn get_binary_path(&self) -> Result<Option<String>, SettingsError>;

    async fn set_binary_path(&self, path: String) -> Result<(), SettingsError>;
}

/// Settings API backed by a JSON file on disk
pub struct FileSettingsApi {
    path: PathBuf,
    store: Arc<dyn KeyValueStore>,
}

impl FileSettingsApi {
    pub fn new(path: impl Into<PathBuf>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            path: path.into(),
            store,
        }
    }

    pub fn from_config(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(config.claude_settings_path.clone(), store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsApi for FileSettingsApi {
    async fn get_settings(&self) -> Result<SettingsBlob, SettingsError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file, starting empty");
                return Ok(SettingsBlob::new());
            }
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(SettingsBlob::new());
        }

        match serde_json::from_str::<Value>(&strip_comments(&text))? {
            Value::Object(settings) => Ok(settings),
            other => {
                warn!(path = %self.path.display(), kind = json_kind(&other), "Settings file is not an object");
                Ok(SettingsBlob::new())
            }
        }
    }

    async fn save_settings(&self, settings: SettingsBlob) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut json = serde_json::to_string_pretty(&Value::Object(settings))?;
        json.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    async fn get_binary_path(&self) -> Result<Option<String>, SettingsError> {
        Ok(self.store.get(BINARY_PATH_KEY)?)
    }

    async fn set_binary_path(&self, path: String) -> Result<(), SettingsError> {
        self.store.set(BINARY_PATH_KEY, &path)?;
        self.store.flush()?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
