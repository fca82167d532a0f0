//! Application Configuration

use std::path::{Path, PathBuf};

use pixart_grid::{GridConfiguration, Size};
use serde::{Deserialize, Serialize};

use crate::EXPORT_FILENAME;

/// Application configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Surface size before any image is loaded
    pub surface: Size,

    /// Initial grid configuration. `cell_size` is also the size the slider
    /// resets to when an image loads.
    pub grid: GridConfiguration,

    /// Directory exported images are written to
    pub output_dir: PathBuf,

    /// Exported image filename
    pub export_filename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface: Size::new(600, 600),
            grid: GridConfiguration::default(),
            output_dir: PathBuf::from("."),
            export_filename: EXPORT_FILENAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
