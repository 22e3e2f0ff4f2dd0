//! Configuration module for ChanVis
//!
//! This module handles application configuration including:
//! - Application state persistence (preferences, last used settings)
//! - Runtime settings edited through the settings table
//!
//! Channel data itself is never persisted here; it only leaves the
//! application through an explicit export.
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.chanvis.chanvis-rs/`
//! - **macOS**: `~/Library/Application Support/dev.chanvis.chanvis-rs/`
//! - **Windows**: `%APPDATA%\dev.chanvis.chanvis-rs\`
//!
//! # Files
//!
//! - `app_state.json` - Preferences and the settings in force at last exit
//!
//! # Example
//!
//! ```ignore
//! use chanvis_rs::config::AppState;
//!
//! let mut state = AppState::load_or_default();
//! state.ui_preferences.channel_count = 4;
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{ChanVisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.chanvis.chanvis-rs";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Default number of channels shown on first launch
pub const DEFAULT_CHANNEL_COUNT: usize = 3;

/// Upper bound offered by the channel count control
pub const MAX_CHANNEL_COUNT: usize = 32;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        ChanVisError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            ChanVisError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== App State ====================

/// Persistent application state
///
/// Stores user preferences and the generation/display settings in force
/// when the application last exited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,

    /// Interval and range in force at last exit
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Vertical scale in force at last exit
    #[serde(default = "default_vertical_scale")]
    pub vertical_scale: f32,

    /// Numeric readout toggle at last exit
    #[serde(default = "default_true")]
    pub show_numeric_indicator: bool,

    /// Directory of the last exported or imported file
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

fn default_app_state_version() -> u32 {
    1
}

fn default_vertical_scale() -> f32 {
    DEFAULT_VERTICAL_SCALE
}

fn default_true() -> bool {
    true
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            ui_preferences: UiPreferences::default(),
            generation: GenerationConfig::default(),
            vertical_scale: DEFAULT_VERTICAL_SCALE,
            show_numeric_indicator: true,
            last_directory: None,
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            ChanVisError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load app state from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ChanVisError::Config(format!("Failed to read app state: {}", e)))?;

        let mut state: Self = serde_json::from_str(&content)
            .map_err(|e| ChanVisError::Config(format!("Failed to parse app state: {}", e)))?;
        state.sanitize();
        Ok(state)
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }

    /// Save app state to an explicit file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ChanVisError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| ChanVisError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Remember the directory of a file the user just picked
    pub fn remember_directory(&mut self, file: impl AsRef<Path>) {
        if let Some(parent) = file.as_ref().parent() {
            self.last_directory = Some(parent.to_path_buf());
        }
    }

    /// Replace values a hand-edited file may have broken with defaults
    fn sanitize(&mut self) {
        if validate_channel_count(self.ui_preferences.channel_count).is_err()
            || self.ui_preferences.channel_count > MAX_CHANNEL_COUNT
        {
            tracing::warn!(
                "Ignoring stored channel count {}",
                self.ui_preferences.channel_count
            );
            self.ui_preferences.channel_count = DEFAULT_CHANNEL_COUNT;
        }
        if !(self.vertical_scale.is_finite() && self.vertical_scale > 0.0) {
            self.vertical_scale = DEFAULT_VERTICAL_SCALE;
        }
        if !(self.ui_preferences.font_scale.is_finite() && self.ui_preferences.font_scale > 0.0) {
            self.ui_preferences.font_scale = default_font_scale();
        }
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Multiplier applied to every text style
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// Number of channels the widget is hosted with
    #[serde(default = "default_channel_count")]
    pub channel_count: usize,
}

fn default_font_scale() -> f32 {
    1.0
}

fn default_channel_count() -> usize {
    DEFAULT_CHANNEL_COUNT
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: default_font_scale(),
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert_eq!(state.version, 1);
        assert_eq!(state.ui_preferences.channel_count, DEFAULT_CHANNEL_COUNT);
        assert_eq!(state.generation.interval_ms, DEFAULT_INTERVAL_MS);
        assert!(state.show_numeric_indicator);
        assert!(state.last_directory.is_none());
    }

    #[test]
    fn test_app_state_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.ui_preferences.channel_count = 5;
        state.ui_preferences.dark_mode = false;
        state.generation = GenerationConfig {
            interval_ms: 250,
            range: ValueRange::new(-4, 4).unwrap(),
        };
        state.vertical_scale = 2.5;
        state.show_numeric_indicator = false;
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.ui_preferences.channel_count, 5);
        assert!(!loaded.ui_preferences.dark_mode);
        assert_eq!(loaded.generation, state.generation);
        assert_eq!(loaded.vertical_scale, 2.5);
        assert!(!loaded.show_numeric_indicator);
    }

    #[test]
    fn test_app_state_missing_fields_use_defaults() {
        let loaded: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.vertical_scale, DEFAULT_VERTICAL_SCALE);
        assert!(loaded.show_numeric_indicator);
        assert_eq!(loaded.generation, GenerationConfig::default());
    }

    #[test]
    fn test_app_state_sanitizes_broken_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);
        std::fs::write(
            &path,
            r#"{"ui_preferences":{"channel_count":0,"font_scale":-1.0},"vertical_scale":0.0}"#,
        )
        .unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.ui_preferences.channel_count, DEFAULT_CHANNEL_COUNT);
        assert_eq!(loaded.ui_preferences.font_scale, 1.0);
        assert_eq!(loaded.vertical_scale, DEFAULT_VERTICAL_SCALE);
    }

    #[test]
    fn test_app_state_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            AppState::load_from(&path),
            Err(ChanVisError::Config(_))
        ));
    }

    #[test]
    fn test_remember_directory() {
        let mut state = AppState::default();
        state.remember_directory("/tmp/data/channelsData.json");
        assert_eq!(state.last_directory, Some(PathBuf::from("/tmp/data")));
    }
}
