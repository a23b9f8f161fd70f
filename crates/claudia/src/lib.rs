//! # Claudia
//!
//! Builds the appearance services once at startup and hands them out
//! through `Arc`.

pub mod cli;
pub mod logging;

use std::sync::Arc;
use anyhow::Result;

use claudia_core::{AppConfig, FileStore, KeyValueStore, StyleScope};
use settings::{FileSettingsApi, SettingsPanel};
use theme::ThemeManager;
use zoom::ZoomManager;

/// The theme and zoom services plus what they share
pub struct Appearance {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    scope: Arc<StyleScope>,
    theme: Arc<ThemeManager>,
    zoom: Arc<ZoomManager>,
}

impl Appearance {
    /// Open the configured store and apply the persisted appearance
    pub fn start(config: AppConfig) -> Self {
        let store = Arc::new(FileStore::open(config.storage_path.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let scope = Arc::new(StyleScope::new());
        let theme = Arc::new(ThemeManager::new(store.clone(), scope.clone()));
        let zoom = Arc::new(ZoomManager::new(store.clone(), scope.clone()));

        tracing::info!(
            theme = %theme.current_theme(),
            zoom = %zoom.current_zoom(),
            "Appearance ready"
        );

        Self {
            config,
            store,
            scope,
            theme,
            zoom,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn theme(&self) -> &Arc<ThemeManager> {
        &self.theme
    }

    pub fn zoom(&self) -> &Arc<ZoomManager> {
        &self.zoom
    }

    /// Presentation properties as currently applied
    pub fn scope(&self) -> &Arc<StyleScope> {
        &self.scope
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Settings panel over the configured settings file
    pub fn settings_panel(&self) -> SettingsPanel<FileSettingsApi> {
        let api = FileSettingsApi::from_config(&self.config, self.store.clone());
        SettingsPanel::new(api, self.theme.clone(), self.zoom.clone())
    }

    /// Flush pending writes
    pub fn shutdown(self) -> Result<()> {
        self.store.flush()?;
        tracing::debug!("Appearance shut down");
        Ok(())
    }
}
