//! Presentation context
//!
//! The surface that visual state is published to. Services write named
//! properties (CSS custom properties such as `--color-primary`) and a
//! page-wide scale factor; visual components read them back.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use parking_lot::RwLock;

/// Global presentation surface
pub trait PresentationContext: Send + Sync {
    /// Set a named property
    fn set_property(&self, name: &str, value: &str);

    /// Set the whole-page visual scale factor
    fn set_scale(&self, factor: f64);
}

/// In-memory presentation context
///
/// Records properties in name order and can render them as a stylesheet
/// for a webview host.
#[derive(Debug)]
pub struct StyleScope {
    properties: RwLock<BTreeMap<String, String>>,
    scale: RwLock<f64>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(BTreeMap::new()),
            scale: RwLock::new(1.0),
        }
    }

    /// Get a property value
    pub fn property(&self, name: &str) -> Option<String> {
        self.properties.read().get(name).cloned()
    }

    /// Snapshot of all properties
    pub fn properties(&self) -> BTreeMap<String, String> {
        self.properties.read().clone()
    }

    /// Current scale factor
    pub fn scale(&self) -> f64 {
        *self.scale.read()
    }

    /// Render as CSS
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.properties.read().iter() {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        let _ = write!(css, "body {{\n  zoom: {};\n}}\n", self.scale());
        css
    }
}

impl Default for StyleScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationContext for StyleScope {
    fn set_property(&self, name: &str, value: &str) {
        self.properties
            .write()
            .insert(name.to_string(), value.to_string());
    }

    fn set_scale(&self, factor: f64) {
        *self.scale.write() = factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_overwrite() {
        let scope = StyleScope::new();
        scope.set_property("--color-primary", "oklch(0.5 0.15 250)");
        scope.set_property("--color-primary", "oklch(0.5 0.15 130)");

        assert_eq!(
            scope.property("--color-primary").as_deref(),
            Some("oklch(0.5 0.15 130)")
        );
        assert_eq!(scope.properties().len(), 1);
    }

    #[test]
    fn test_to_css() {
        let scope = StyleScope::new();
        scope.set_property("--app-zoom", "1.5");
        scope.set_property("--app-zoom-percent", "150%");
        scope.set_scale(1.5);

        let css = scope.to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --app-zoom: 1.5;\n"));
        assert!(css.contains("  --app-zoom-percent: 150%;\n"));
        assert!(css.contains("body {\n  zoom: 1.5;\n}"));
    }

    #[test]
    fn test_default_scale() {
        assert_eq!(StyleScope::default().scale(), 1.0);
    }
}
