//! TableKit Settings Crate
//!
//! Handles editor configuration, validation and settings persistence.

pub mod config;
pub mod error;

pub use config::{default_config_path, CanvasSettings, Config, EditorSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
