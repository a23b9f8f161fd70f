//! Settings panel model
//!
//! Drives loading and saving through a [`SettingsApi`] and forwards the
//! appearance controls to the theme and zoom managers. Backend failures
//! never escape as errors; they become the panel's `error` and `toast`
//! state, which the view shows until dismissed.

use std::sync::Arc;
use tracing::{error, info, warn};

use theme::{BackgroundTheme, ThemeColor, ThemeError, ThemeManager, ThemeName};
use zoom::{ZoomLevel, ZoomManager, ZoomPreset};

use crate::api::SettingsApi;
use crate::draft::SettingsDraft;

pub const LOAD_ERROR: &str = "Failed to load settings. Please ensure ~/.claude directory exists.";
pub const SAVE_ERROR: &str = "Failed to save settings.";

const SAVED_TOAST: &str = "Settings saved successfully!";
const SAVE_FAILED_TOAST: &str = "Failed to save settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    fn success(message: &str) -> Self {
        Self { message: message.to_string(), kind: ToastKind::Success }
    }

    fn error(message: &str) -> Self {
        Self { message: message.to_string(), kind: ToastKind::Error }
    }
}

/// Settings panel
pub struct SettingsPanel<A: SettingsApi> {
    api: A,
    theme: Arc<ThemeManager>,
    zoom: Arc<ZoomManager>,
    draft: SettingsDraft,
    error: Option<String>,
    toast: Option<Toast>,
    current_binary_path: Option<String>,
    selected_installation: Option<String>,
    binary_path_changed: bool,
}

impl<A: SettingsApi> SettingsPanel<A> {
    pub fn new(api: A, theme: Arc<ThemeManager>, zoom: Arc<ZoomManager>) -> Self {
        Self {
            api,
            theme,
            zoom,
            draft: SettingsDraft::default(),
            error: None,
            toast: None,
            current_binary_path: None,
            selected_installation: None,
            binary_path_changed: false,
        }
    }

    /// Fetch the settings document and the selected binary
    pub async fn load(&mut self) {
        self.error = None;

        match self.api.get_settings().await {
            Ok(settings) => {
                self.draft = SettingsDraft::from_blob(settings);
            }
            Err(e) => {
                error!(error = %e, "Failed to load settings");
                self.error = Some(LOAD_ERROR.to_string());
                self.draft = SettingsDraft::default();
            }
        }

        match self.api.get_binary_path().await {
            Ok(path) => self.current_binary_path = path,
            Err(e) => warn!(error = %e, "Failed to load binary path"),
        }
    }

    /// Save the draft, and the selected binary if it changed
    ///
    /// Returns whether everything was written.
    pub async fn save(&mut self) -> bool {
        self.error = None;
        self.toast = None;

        match self.write().await {
            Ok(()) => {
                info!("Settings saved");
                self.toast = Some(Toast::success(SAVED_TOAST));
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to save settings");
                self.error = Some(SAVE_ERROR.to_string());
                self.toast = Some(Toast::error(SAVE_FAILED_TOAST));
                false
            }
        }
    }

    async fn write(&mut self) -> Result<(), crate::SettingsError> {
        let settings = self.draft.to_blob();
        self.api.save_settings(settings.clone()).await?;
        self.draft.commit(settings);

        if self.binary_path_changed {
            if let Some(path) = self.selected_installation.clone() {
                self.api.set_binary_path(path.clone()).await?;
                self.current_binary_path = Some(path);
                self.binary_path_changed = false;
            }
        }
        Ok(())
    }

    pub fn draft(&self) -> &SettingsDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SettingsDraft {
        &mut self.draft
    }

    /// Pretty JSON of what `save` would write
    pub fn raw_json(&self) -> String {
        self.draft.raw_json()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn current_binary_path(&self) -> Option<&str> {
        self.current_binary_path.as_deref()
    }

    pub fn selected_installation(&self) -> Option<&str> {
        self.selected_installation.as_deref()
    }

    /// True while a selected binary is waiting to be saved
    pub fn binary_path_changed(&self) -> bool {
        self.binary_path_changed
    }

    pub fn select_installation(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.binary_path_changed = self.current_binary_path.as_deref() != Some(path.as_str());
        self.selected_installation = Some(path);
    }

    pub fn current_theme(&self) -> ThemeName {
        self.theme.current_theme()
    }

    /// The accent and background pickers are shown for the custom theme only
    pub fn show_color_picker(&self) -> bool {
        self.current_theme() == ThemeName::Custom
    }

    pub fn select_theme(&self, name: ThemeName) {
        self.theme.set_theme(name);
    }

    /// Recompose the custom theme with a new accent
    pub fn select_accent(&self, accent: &ThemeColor) -> Result<(), ThemeError> {
        let background = self.theme.custom_background();
        self.theme.set_custom_theme(accent, &background)
    }

    /// Recompose the custom theme with a new background palette
    pub fn select_background(&self, background: &BackgroundTheme) -> Result<(), ThemeError> {
        let accent = self.theme.custom_accent();
        self.theme.set_custom_theme(&accent, background)
    }

    pub fn current_zoom(&self) -> ZoomLevel {
        self.zoom.current_zoom()
    }

    pub fn zoom_in(&self) -> ZoomLevel {
        self.zoom.increase_zoom()
    }

    pub fn zoom_out(&self) -> ZoomLevel {
        self.zoom.decrease_zoom()
    }

    pub fn reset_zoom(&self) -> ZoomLevel {
        self.zoom.reset_zoom()
    }

    pub fn select_zoom_preset(&self, preset: &ZoomPreset) -> ZoomLevel {
        self.zoom.apply_preset(preset)
    }

    /// Apply a typed percentage
    ///
    /// Input that is not a number within the zoom range is ignored.
    pub fn set_custom_zoom(&self, input: &str) -> Option<ZoomLevel> {
        let value = input.trim().parse::<i64>().ok()?;
        let range = self.zoom.zoom_range();
        (i64::from(range.min)..=i64::from(range.max))
            .contains(&value)
            .then(|| self.zoom.set_zoom(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use claudia_core::{MemoryStore, StyleScope};
    use theme::catalog::{background_themes, preset_colors};

    use crate::draft::RuleKind;
    use crate::{SettingsBlob, SettingsError};

    #[derive(Default)]
    struct FakeApi {
        settings: Mutex<SettingsBlob>,
        binary_path: Mutex<Option<String>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    fn unavailable() -> SettingsError {
        SettingsError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "no ~/.claude"))
    }

    #[async_trait]
    impl SettingsApi for Arc<FakeApi> {
        async fn get_settings(&self) -> Result<SettingsBlob, SettingsError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(unavailable());
            }
            Ok(self.settings.lock().clone())
        }

        async fn save_settings(&self, settings: SettingsBlob) -> Result<(), SettingsError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(unavailable());
            }
            *self.settings.lock() = settings;
            Ok(())
        }

        async fn get_binary_path(&self) -> Result<Option<String>, SettingsError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(unavailable());
            }
            Ok(self.binary_path.lock().clone())
        }

        async fn set_binary_path(&self, path: String) -> Result<(), SettingsError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(unavailable());
            }
            *self.binary_path.lock() = Some(path);
            Ok(())
        }
    }

    fn panel_with(settings: Value) -> (SettingsPanel<Arc<FakeApi>>, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        if let Value::Object(map) = settings {
            *api.settings.lock() = map;
        }

        let store = Arc::new(MemoryStore::new());
        let scope = Arc::new(StyleScope::new());
        let theme = Arc::new(ThemeManager::new(store.clone(), scope.clone()));
        let zoom = Arc::new(ZoomManager::new(store, scope));
        (SettingsPanel::new(Arc::clone(&api), theme, zoom), api)
    }

    #[tokio::test]
    async fn test_load_populates_draft() {
        let (mut panel, api) = panel_with(json!({
            "permissions": { "allow": ["Bash(ls)"] },
            "verbose": true
        }));
        *api.binary_path.lock() = Some("/opt/claude".into());

        panel.load().await;

        assert_eq!(panel.error(), None);
        assert_eq!(panel.draft().rules(RuleKind::Allow)[0].value, "Bash(ls)");
        assert!(panel.draft().verbose());
        assert_eq!(panel.current_binary_path(), Some("/opt/claude"));
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let (mut panel, api) = panel_with(json!({ "verbose": true }));
        api.fail_reads.store(true, Ordering::SeqCst);

        panel.load().await;

        assert_eq!(panel.error(), Some(LOAD_ERROR));
        assert_eq!(*panel.draft(), SettingsDraft::default());

        panel.dismiss_error();
        assert_eq!(panel.error(), None);
    }

    #[tokio::test]
    async fn test_save_writes_blob_and_toasts() {
        let (mut panel, api) = panel_with(json!({ "model": "sonnet" }));
        panel.load().await;

        let id = panel.draft_mut().add_rule(RuleKind::Deny);
        panel.draft_mut().update_rule(RuleKind::Deny, id, "Bash(rm:*)");

        assert!(panel.save().await);
        assert_eq!(panel.toast(), Some(&Toast::success("Settings saved successfully!")));

        let saved = api.settings.lock().clone();
        assert_eq!(saved["model"], "sonnet");
        assert_eq!(saved["permissions"]["deny"], json!(["Bash(rm:*)"]));

        panel.dismiss_toast();
        assert_eq!(panel.toast(), None);
    }

    #[tokio::test]
    async fn test_save_failure_sets_error_and_toast() {
        let (mut panel, api) = panel_with(json!({}));
        panel.load().await;
        api.fail_writes.store(true, Ordering::SeqCst);

        assert!(!panel.save().await);
        assert_eq!(panel.error(), Some(SAVE_ERROR));
        assert_eq!(panel.toast().map(|t| t.kind), Some(ToastKind::Error));
        assert_eq!(panel.toast().map(|t| t.message.as_str()), Some("Failed to save settings"));
    }

    #[tokio::test]
    async fn test_installation_change_saved_once() {
        let (mut panel, api) = panel_with(json!({}));
        *api.binary_path.lock() = Some("/usr/bin/claude".into());
        panel.load().await;

        panel.select_installation("/usr/bin/claude");
        assert!(!panel.binary_path_changed());

        panel.select_installation("/home/me/.local/bin/claude");
        assert!(panel.binary_path_changed());

        assert!(panel.save().await);
        assert!(!panel.binary_path_changed());
        assert_eq!(panel.current_binary_path(), Some("/home/me/.local/bin/claude"));
        assert_eq!(api.binary_path.lock().as_deref(), Some("/home/me/.local/bin/claude"));
    }

    #[tokio::test]
    async fn test_installation_written_only_when_pending() {
        let (mut panel, api) = panel_with(json!({}));
        panel.load().await;

        panel.select_installation("/a/claude");
        panel.select_installation("/a/claude");
        assert!(panel.binary_path_changed());

        *api.binary_path.lock() = None;
        panel.select_installation("/a/claude");
        panel.save().await;
        assert_eq!(api.binary_path.lock().as_deref(), Some("/a/claude"));

        *api.binary_path.lock() = Some("/elsewhere".into());
        panel.save().await;
        assert_eq!(api.binary_path.lock().as_deref(), Some("/elsewhere"));
    }

    #[tokio::test]
    async fn test_theme_controls() {
        let (panel, _) = panel_with(json!({}));

        assert!(!panel.show_color_picker());
        panel.select_theme(ThemeName::Custom);
        assert!(panel.show_color_picker());

        panel.select_background(&background_themes()[1]).unwrap();
        panel.select_accent(&preset_colors()[3]).unwrap();

        let custom = panel.theme.theme(ThemeName::Custom);
        assert_eq!(custom.colors.primary, preset_colors()[3].primary);
        assert_eq!(custom.colors.background, background_themes()[1].background);
    }

    #[tokio::test]
    async fn test_zoom_controls() {
        let (panel, _) = panel_with(json!({}));

        assert_eq!(panel.zoom_in().percent(), 110);
        assert_eq!(panel.zoom_out().percent(), 100);
        assert_eq!(panel.select_zoom_preset(&zoom::zoom_presets()[5]).percent(), 200);
        assert_eq!(panel.reset_zoom(), ZoomLevel::DEFAULT);

        assert_eq!(panel.set_custom_zoom("137").map(|z| z.percent()), Some(140));
        assert_eq!(panel.set_custom_zoom("400"), None);
        assert_eq!(panel.set_custom_zoom("big"), None);
        assert_eq!(panel.set_custom_zoom("150abc"), None);
        assert_eq!(panel.set_custom_zoom("150.5"), None);
        assert_eq!(panel.current_zoom().percent(), 140);
    }
}
