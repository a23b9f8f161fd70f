//! # Claudia Zoom
//!
//! Whole-application zoom, kept on a 10% lattice between 50% and 300%.

pub mod manager;
pub mod preset;

use std::fmt;
use serde::{Deserialize, Serialize};

use claudia_core::Event;

pub use manager::ZoomManager;
pub use preset::{zoom_presets, ZoomPreset};

pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 300;
pub const ZOOM_STEP: u16 = 10;
pub const DEFAULT_ZOOM: u16 = 100;

/// Zoom percentage, always within bounds and a multiple of the step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub struct ZoomLevel(u16);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(MIN_ZOOM);
    pub const MAX: ZoomLevel = ZoomLevel(MAX_ZOOM);
    pub const DEFAULT: ZoomLevel = ZoomLevel(DEFAULT_ZOOM);

    /// Round half up to the nearest step, then clamp into range
    pub fn normalize(raw: i64) -> Self {
        let step = i64::from(ZOOM_STEP);
        let steps = raw.div_euclid(step) + i64::from(raw.rem_euclid(step) * 2 >= step);
        let min = i64::from(MIN_ZOOM / ZOOM_STEP);
        let max = i64::from(MAX_ZOOM / ZOOM_STEP);

        // Bounded by MAX_ZOOM after the clamp.
        Self((steps.clamp(min, max) * step) as u16)
    }

    /// Percentage value
    pub fn percent(&self) -> u16 {
        self.0
    }

    /// Scale factor, `150%` is `1.5`
    pub fn factor(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Display label, e.g. `150%`
    pub fn percent_label(&self) -> String {
        format!("{}%", self.0)
    }

    /// Position of this level along the full range, 0 to 100
    pub fn track_fill_percent(&self) -> f64 {
        f64::from(self.0 - MIN_ZOOM) * 100.0 / f64::from(MAX_ZOOM - MIN_ZOOM)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<ZoomLevel> for u16 {
    fn from(level: ZoomLevel) -> Self {
        level.0
    }
}

impl TryFrom<u16> for ZoomLevel {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let level = Self::normalize(i64::from(value));
        if level.0 == value {
            Ok(level)
        } else {
            Err(format!("{value} is not a valid zoom level"))
        }
    }
}

/// Bounds and step exposed to controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: u16,
    pub max: u16,
    pub step: u16,
}

impl ZoomRange {
    pub fn can_increase(&self, level: ZoomLevel) -> bool {
        level.percent() < self.max
    }

    pub fn can_decrease(&self, level: ZoomLevel) -> bool {
        level.percent() > self.min
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

/// Emitted after every zoom mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomChanged {
    pub zoom: ZoomLevel,
    pub factor: f64,
}

impl Event for ZoomChanged {
    fn name(&self) -> &'static str { "zoom.changed" }
}
