//! Editor configuration.

use crate::error::ConfigError;
use crate::style::{SerializableColor, StyleSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial canvas width before any base image is loaded.
    pub canvas_width: f64,
    /// Initial canvas height before any base image is loaded.
    pub canvas_height: f64,
    /// Width of the area the canvas is displayed in.
    pub viewport_width: f64,
    /// Height of the area the canvas is displayed in.
    pub viewport_height: f64,
    /// Share of the viewport width a base image may occupy.
    pub viewport_fit_width: f64,
    /// Share of the viewport height a base image may occupy.
    pub viewport_fit_height: f64,
    /// Side length of newly added boxes and blur regions.
    pub default_box_size: f64,
    /// Outline and handle stroke color for selected elements.
    pub selection_color: SerializableColor,
    /// Initial style settings.
    pub style: StyleSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            viewport_fit_width: 0.9,
            viewport_fit_height: 0.8,
            default_box_size: 100.0,
            selection_color: SerializableColor::blue(),
            style: StyleSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Largest size a base image may be displayed at.
    pub fn base_image_limits(&self) -> (f64, f64) {
        (
            self.viewport_width * self.viewport_fit_width,
            self.viewport_height * self.viewport_fit_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.canvas_width, 800.0);
        assert_eq!(config.canvas_height, 600.0);
        assert_eq!(config.default_box_size, 100.0);
        assert_eq!(config.base_image_limits(), (1152.0, 640.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(
            r##"{ "canvas_width": 1024, "style": { "font_size": 32, "color": "#ff0000" } }"##,
        )
        .unwrap();
        assert_eq!(config.canvas_width, 1024.0);
        assert_eq!(config.canvas_height, 600.0);
        assert_eq!(config.style.font_size, 32.0);
        assert_eq!(config.style.color, SerializableColor::new(255, 0, 0, 255));
        assert_eq!(config.style.font_family, "Arial");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "viewport_width": 2000, "viewport_fit_width": 0.5 }}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.base_image_limits().0, 1000.0);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = EditorConfig::load(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let bad = EditorConfig::from_json_str("{ not json");
        assert!(matches!(bad, Err(ConfigError::Parse(_))));
    }
}
