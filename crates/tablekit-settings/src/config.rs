//! Configuration and settings management for TableKit
//!
//! Provides configuration file handling and validation for the floor-plan
//! editor. Supports JSON and TOML file formats stored in the platform-specific
//! configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Editor settings (size limits, perimeter closure, drag throttling, history)
//! - Canvas settings (scene dimensions, background, interaction flags)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the application directory under the platform config dir.
pub const APP_DIR_NAME: &str = "tablekit";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Editing rules applied by the designer before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Minimum table width/height in pixels
    pub table_min_size: f64,
    /// Minimum obstacle width/height in pixels
    pub obstacle_min_size: f64,
    /// Maximum width/height for any entity in pixels
    pub max_size: f64,
    /// Radius around the first perimeter point that closes a custom perimeter
    pub closure_threshold: f64,
    /// Offset applied to both axes when duplicating an obstacle
    pub duplicate_offset: f64,
    /// Minimum interval between live drag redraws
    pub drag_throttle_ms: u64,
    /// Number of snapshots kept for undo
    pub history_limit: usize,
    /// Capacity of the perimeter containment memo
    pub containment_cache_capacity: usize,
    /// Extra pixels accepted around shapes when hit testing
    pub hit_tolerance: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            table_min_size: 20.0,
            obstacle_min_size: 10.0,
            max_size: 1000.0,
            closure_threshold: 20.0,
            duplicate_offset: 20.0,
            drag_throttle_ms: 16,
            history_limit: 50,
            containment_cache_capacity: 256,
            hit_tolerance: 2.0,
        }
    }
}

/// Canvas scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Scene width in pixels
    pub width: f64,
    /// Scene height in pixels
    pub height: f64,
    /// Fallback background color when a plan defines none
    pub background_color: String,
    /// Whether the canvas accepts mutations at all
    pub editable: bool,
    /// Whether entities can be dragged
    pub drag_mode: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background_color: "#FFFFFF".to_string(),
            editable: true,
            drag_mode: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing rules
    pub editor: EditorSettings,
    /// Canvas scene
    pub canvas: CanvasSettings,
}

/// Returns the default configuration file path for the current platform.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
    })?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;

        positive("editor.table_min_size", editor.table_min_size)?;
        positive("editor.obstacle_min_size", editor.obstacle_min_size)?;
        positive("editor.closure_threshold", editor.closure_threshold)?;

        if !editor.max_size.is_finite()
            || editor.max_size < editor.table_min_size
            || editor.max_size < editor.obstacle_min_size
        {
            return Err(SettingsError::InvalidSetting {
                key: "editor.max_size".to_string(),
                reason: "must be at least the largest minimum size".to_string(),
            });
        }

        if !editor.duplicate_offset.is_finite() {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.duplicate_offset".to_string(),
                value: editor.duplicate_offset.to_string(),
            }
            .into());
        }

        if editor.containment_cache_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.containment_cache_capacity".to_string(),
                value: "0".to_string(),
            }
            .into());
        }

        if !editor.hit_tolerance.is_finite() || editor.hit_tolerance < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.hit_tolerance".to_string(),
                value: editor.hit_tolerance.to_string(),
            }
            .into());
        }

        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;

        Ok(())
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
