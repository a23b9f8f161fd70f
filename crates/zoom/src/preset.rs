//! Zoom presets

use serde::Serialize;

use crate::ZoomLevel;

/// Named zoom shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoomPreset {
    pub label: &'static str,
    /// Raw percentage, not necessarily on the step lattice
    pub value: u16,
    pub description: &'static str,
}

impl ZoomPreset {
    /// Level this preset resolves to once applied
    pub fn level(&self) -> ZoomLevel {
        ZoomLevel::normalize(i64::from(self.value))
    }
}

static ZOOM_PRESETS: [ZoomPreset; 7] = [
    ZoomPreset { label: "50%", value: 50, description: "Smallest" },
    ZoomPreset { label: "75%", value: 75, description: "Smaller" },
    ZoomPreset { label: "100%", value: 100, description: "Default" },
    ZoomPreset { label: "125%", value: 125, description: "Larger" },
    ZoomPreset { label: "150%", value: 150, description: "Large" },
    ZoomPreset { label: "200%", value: 200, description: "Extra Large" },
    ZoomPreset { label: "300%", value: 300, description: "Maximum" },
];

/// Presets in ascending order
pub fn zoom_presets() -> &'static [ZoomPreset] {
    &ZOOM_PRESETS
}
