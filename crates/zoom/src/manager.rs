//! Zoom manager service

use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use claudia_core::{EventEmitter, KeyValueStore, PresentationContext, Subscription};

use crate::preset::{zoom_presets, ZoomPreset};
use crate::{ZoomChanged, ZoomLevel, ZoomRange, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

pub const ZOOM_LEVEL_KEY: &str = "zoom-level";

/// Zoom manager
pub struct ZoomManager {
    current: RwLock<ZoomLevel>,
    store: Arc<dyn KeyValueStore>,
    presentation: Arc<dyn PresentationContext>,
    events: EventEmitter<ZoomChanged>,
}

impl ZoomManager {
    /// Load the persisted level and apply it
    pub fn new(store: Arc<dyn KeyValueStore>, presentation: Arc<dyn PresentationContext>) -> Self {
        let current = load_level(store.as_ref());
        info!(zoom = %current, "Zoom manager initialized");

        let manager = Self {
            current: RwLock::new(current),
            store,
            presentation,
            events: EventEmitter::new(),
        };
        manager.apply(current);
        manager
    }

    /// Subscribe to zoom changes
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ZoomChanged) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn current_zoom(&self) -> ZoomLevel {
        *self.current.read()
    }

    /// Set the zoom percentage, snapped to the step and clamped to range
    pub fn set_zoom(&self, raw: i64) -> ZoomLevel {
        let level = ZoomLevel::normalize(raw);
        *self.current.write() = level;
        debug!(requested = raw, zoom = %level, "Zoom set");

        self.apply(level);
        if let Err(e) = self.store.set(ZOOM_LEVEL_KEY, &level.percent().to_string()) {
            warn!(error = %e, "Failed to save zoom level");
        }
        self.events.emit(&ZoomChanged {
            zoom: level,
            factor: level.factor(),
        });
        level
    }

    pub fn increase_zoom(&self) -> ZoomLevel {
        let next = self.current_zoom().percent().saturating_add(ZOOM_STEP).min(MAX_ZOOM);
        self.set_zoom(i64::from(next))
    }

    pub fn decrease_zoom(&self) -> ZoomLevel {
        let next = self.current_zoom().percent().saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
        self.set_zoom(i64::from(next))
    }

    pub fn reset_zoom(&self) -> ZoomLevel {
        self.set_zoom(i64::from(ZoomLevel::DEFAULT.percent()))
    }

    pub fn apply_preset(&self, preset: &ZoomPreset) -> ZoomLevel {
        self.set_zoom(i64::from(preset.value))
    }

    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange::default()
    }

    pub fn zoom_presets(&self) -> &'static [ZoomPreset] {
        zoom_presets()
    }

    /// Re-read the persisted level and re-apply it
    pub fn reload(&self) {
        let level = load_level(self.store.as_ref());
        *self.current.write() = level;
        self.apply(level);
        self.events.emit(&ZoomChanged {
            zoom: level,
            factor: level.factor(),
        });
    }

    fn apply(&self, level: ZoomLevel) {
        let factor = level.factor();
        self.presentation.set_scale(factor);
        self.presentation.set_property("--app-zoom", &factor.to_string());
        self.presentation.set_property("--app-zoom-percent", &level.percent_label());
    }
}

fn load_level(store: &dyn KeyValueStore) -> ZoomLevel {
    let raw = match store.get(ZOOM_LEVEL_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ZoomLevel::default(),
        Err(e) => {
            warn!(error = %e, "Failed to load zoom level");
            return ZoomLevel::default();
        }
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if (i64::from(MIN_ZOOM)..=i64::from(MAX_ZOOM)).contains(&value) => {
            ZoomLevel::normalize(value)
        }
        _ => {
            warn!(value = %raw, "Ignoring stored zoom level");
            ZoomLevel::default()
        }
    }
}
