//! Startup settings.
//!
//! Read once from `settings.json` in the platform config directory.
//! Nothing is ever written back; the file is configuration, not state.
//! A missing file means defaults, a malformed one logs a single line and
//! falls back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial window position.
    pub window_x: f32,
    pub window_y: f32,
    /// Keep the widget above other windows.
    pub always_on_top: bool,
    /// Seconds each quote stays up before rotating.
    pub quote_dwell_secs: f32,
    /// Custom quote deck; empty means the built-in deck.
    pub quotes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: 100.0,
            window_y: 100.0,
            always_on_top: true,
            quote_dwell_secs: crate::quotes::QUOTE_DWELL_SECS,
            quotes: Vec::new(),
        }
    }
}

/// Config directory for the widget.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tickclock")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Read settings from an explicit path.
pub fn load_from(path: &std::path::Path) -> Result<Settings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read the settings file, falling back to defaults.
pub fn load() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    match load_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("[tickclock] ignoring bad settings file {}: {}", path.display(), err);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.window_x, 100.0);
        assert_eq!(settings.window_y, 100.0);
        assert!(settings.always_on_top);
        assert!(settings.quotes.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "window_x": 640.0 }"#).unwrap();
        assert_eq!(settings.window_x, 640.0);
        assert_eq!(settings.window_y, 100.0);
        assert!(settings.always_on_top);
    }

    #[test]
    fn test_full_file() {
        let json = r#"{
            "window_x": 10.0,
            "window_y": 20.0,
            "always_on_top": false,
            "quote_dwell_secs": 3.0,
            "quotes": ["專注當下"]
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.always_on_top);
        assert_eq!(settings.quote_dwell_secs, 3.0);
        assert_eq!(settings.quotes, vec!["專注當下".to_string()]);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window_x, settings.window_x);
        assert_eq!(back.always_on_top, settings.always_on_top);
    }
}
