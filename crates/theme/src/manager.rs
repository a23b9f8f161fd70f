//! Theme manager service
//!
//! Owns the current selection and the custom theme composition. Every
//! mutation applies the resolved role map to the presentation context,
//! writes the selection to the store and notifies subscribers.
//!
//! Persisted keys:
//! - `theme-selection`: always written
//! - `theme-custom-colors`, `theme-custom-accent`, `theme-custom-background`:
//!   written only while `custom` is the current selection

use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use claudia_core::store::{get_json, set_json};
use claudia_core::{EventEmitter, KeyValueStore, PresentationContext, Subscription};

use crate::catalog::{self, BackgroundTheme, ThemeColor};
use crate::color::is_valid_color;
use crate::custom::compose_custom_colors;
use crate::role::{ColorOverrides, ColorRole, ColorRoleMap};
use crate::{Theme, ThemeChanged, ThemeError, ThemeName};

pub const THEME_SELECTION_KEY: &str = "theme-selection";
pub const CUSTOM_COLORS_KEY: &str = "theme-custom-colors";
pub const CUSTOM_ACCENT_KEY: &str = "theme-custom-accent";
pub const CUSTOM_BACKGROUND_KEY: &str = "theme-custom-background";

#[derive(Debug, Clone)]
struct ThemeState {
    current: ThemeName,
    /// Overrides accumulated since the template
    overrides: ColorOverrides,
    /// Template with overrides applied
    custom_colors: ColorRoleMap,
    custom_accent: ThemeColor,
    custom_background: BackgroundTheme,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            current: ThemeName::default(),
            overrides: ColorOverrides::new(),
            custom_colors: catalog::custom_template().colors,
            custom_accent: catalog::preset_colors()[0].clone(),
            custom_background: catalog::background_themes()[0].clone(),
        }
    }
}

/// Theme manager
pub struct ThemeManager {
    state: RwLock<ThemeState>,
    store: Arc<dyn KeyValueStore>,
    presentation: Arc<dyn PresentationContext>,
    events: EventEmitter<ThemeChanged>,
}

impl ThemeManager {
    /// Load the persisted selection and apply it
    pub fn new(store: Arc<dyn KeyValueStore>, presentation: Arc<dyn PresentationContext>) -> Self {
        let state = load_state(store.as_ref());
        info!(theme = %state.current, "Theme manager initialized");

        let manager = Self {
            state: RwLock::new(state),
            store,
            presentation,
            events: EventEmitter::new(),
        };
        manager.apply_current();
        manager
    }

    /// Subscribe to theme changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ThemeChanged) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn current_theme(&self) -> ThemeName {
        self.state.read().current
    }

    /// Resolve a theme, including the current custom composition
    pub fn theme(&self, name: ThemeName) -> Theme {
        match name {
            ThemeName::Dark => catalog::dark(),
            ThemeName::Light => catalog::light(),
            ThemeName::Custom => Theme {
                colors: self.state.read().custom_colors.clone(),
                ..catalog::custom_template()
            },
        }
    }

    /// All themes in declaration order
    pub fn all_themes(&self) -> Vec<Theme> {
        ThemeName::ALL.iter().map(|name| self.theme(*name)).collect()
    }

    /// Select a theme
    pub fn set_theme(&self, name: ThemeName) {
        self.state.write().current = name;
        info!(theme = %name, "Theme selected");

        self.apply_current();
        self.persist();
        self.notify();
    }

    /// Select a theme by its string id
    pub fn set_theme_by_name(&self, name: &str) -> Result<(), ThemeError> {
        let name = name.parse::<ThemeName>()?;
        self.set_theme(name);
        Ok(())
    }

    /// Compose the custom theme from an accent color and a background palette
    pub fn set_custom_theme(
        &self,
        accent: &ThemeColor,
        background: &BackgroundTheme,
    ) -> Result<(), ThemeError> {
        let colors = compose_custom_colors(accent, background);
        validate(&colors)?;

        {
            let mut state = self.state.write();
            state.custom_accent = accent.clone();
            state.custom_background = background.clone();
        }
        debug!(accent = %accent.name, background = %background.name, "Custom theme composed");

        self.merge_custom_colors(colors);
        Ok(())
    }

    /// Merge overrides into the custom theme
    pub fn set_custom_colors(&self, colors: ColorOverrides) -> Result<(), ThemeError> {
        validate(&colors)?;
        self.merge_custom_colors(colors);
        Ok(())
    }

    /// Overrides applied on top of the custom template
    pub fn custom_overrides(&self) -> ColorOverrides {
        self.state.read().overrides.clone()
    }

    /// Accent color last used to compose the custom theme
    pub fn custom_accent(&self) -> ThemeColor {
        self.state.read().custom_accent.clone()
    }

    /// Background palette last used to compose the custom theme
    pub fn custom_background(&self) -> BackgroundTheme {
        self.state.read().custom_background.clone()
    }

    pub fn preset_colors(&self) -> &'static [ThemeColor] {
        catalog::preset_colors()
    }

    pub fn background_themes(&self) -> &'static [BackgroundTheme] {
        catalog::background_themes()
    }

    /// Re-read persisted state and re-apply it
    pub fn reload(&self) {
        let state = load_state(self.store.as_ref());
        info!(theme = %state.current, "Theme settings reloaded");
        *self.state.write() = state;

        self.apply_current();
        self.notify();
    }

    fn merge_custom_colors(&self, colors: ColorOverrides) {
        let active = {
            let mut state = self.state.write();
            state.custom_colors.apply(&colors);
            state.overrides.extend(colors);
            state.current == ThemeName::Custom
        };

        if active {
            self.apply_current();
        }
        self.persist();
        self.notify();
    }

    fn apply_current(&self) {
        let name = self.current_theme();
        let theme = self.theme(name);

        for (role, value) in theme.colors.iter() {
            self.presentation.set_property(&role.property_name(), value);
        }
        debug!(theme = %name, "Theme applied");
    }

    fn notify(&self) {
        let event = ThemeChanged {
            theme: self.current_theme(),
        };
        self.events.emit(&event);
    }

    fn persist(&self) {
        let state = self.state.read().clone();
        let store = self.store.as_ref();

        if let Err(e) = store.set(THEME_SELECTION_KEY, state.current.as_str()) {
            warn!(error = %e, "Failed to save theme selection");
        }

        if state.current == ThemeName::Custom {
            if let Err(e) = set_json(store, CUSTOM_COLORS_KEY, &state.overrides) {
                warn!(error = %e, "Failed to save custom theme colors");
            }
            if let Err(e) = set_json(store, CUSTOM_ACCENT_KEY, &state.custom_accent) {
                warn!(error = %e, "Failed to save custom theme accent");
            }
            if let Err(e) = set_json(store, CUSTOM_BACKGROUND_KEY, &state.custom_background) {
                warn!(error = %e, "Failed to save custom theme background");
            }
        }
    }
}

fn validate(colors: &ColorOverrides) -> Result<(), ThemeError> {
    match colors.iter().find(|(_, value)| !is_valid_color(value)) {
        Some((role, value)) => Err(ThemeError::InvalidColor {
            role: *role,
            value: value.clone(),
        }),
        None => Ok(()),
    }
}

/// Keep the stored entries that name a known role and hold a valid color
fn decode_overrides(raw: BTreeMap<String, Value>) -> ColorOverrides {
    let mut overrides = ColorOverrides::new();

    for (key, value) in raw {
        let role = match key.parse::<ColorRole>() {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, "Dropping stored color");
                continue;
            }
        };
        match value {
            Value::String(color) if is_valid_color(&color) => {
                overrides.insert(role, color);
            }
            other => warn!(role = %role, value = %other, "Dropping invalid stored color"),
        }
    }

    overrides
}

fn load_state(store: &dyn KeyValueStore) -> ThemeState {
    let mut state = ThemeState::default();

    match store.get(THEME_SELECTION_KEY) {
        Ok(Some(raw)) => match raw.parse::<ThemeName>() {
            Ok(name) => state.current = name,
            Err(e) => warn!(error = %e, "Ignoring stored theme selection"),
        },
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to load theme selection"),
    }

    if state.current != ThemeName::Custom {
        return state;
    }

    match get_json::<BTreeMap<String, Value>>(store, CUSTOM_COLORS_KEY) {
        Ok(Some(raw)) => {
            let overrides = decode_overrides(raw);
            state.custom_colors.apply(&overrides);
            state.overrides = overrides;
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to load custom theme colors"),
    }

    match get_json::<ThemeColor>(store, CUSTOM_ACCENT_KEY) {
        Ok(Some(accent)) => state.custom_accent = accent,
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to load custom theme accent"),
    }

    match get_json::<BackgroundTheme>(store, CUSTOM_BACKGROUND_KEY) {
        Ok(Some(background)) => state.custom_background = background,
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to load custom theme background"),
    }

    state
}
