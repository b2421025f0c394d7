//! Application window configuration.
//!
//! The game collaborator supplies one of these from
//! [`Game::config`](crate::Game::config); it can also be persisted to disk
//! as RON.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or saving an [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

/// Window name, position, and size requested at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window title.
    pub name: String,
    /// Window x position in screen coordinates.
    pub start_x: i32,
    /// Window y position in screen coordinates.
    pub start_y: i32,
    /// Window width in pixels.
    pub start_width: u32,
    /// Window height in pixels.
    pub start_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Kestrel Application".to_string(),
            start_x: 100,
            start_y: 100,
            start_width: 1280,
            start_height: 720,
        }
    }
}

impl AppConfig {
    /// Loads a config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        ron::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Saves the config as pretty-printed RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Write)
    }
}
