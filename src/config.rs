use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::export::ExportOptions;
use crate::submission::ScanOptions;

/// Tracker configuration, loaded from an optional TOML file.
/// Missing tables and keys take their defaults.
///
/// ```toml
/// [scan]
/// extensions = ["doc", "docx", "pdf", "txt"]
/// follow_links = true
///
/// [export]
/// delimiter = ","
/// write_bom = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub scan: ScanOptions,
    pub export: ExportOptions,
}

impl TrackerConfig {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let config_error = |reason: String| TrackerError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = Self::from_toml(&content).map_err(|e| config_error(e.to_string()))?;

        if !config.export.delimiter.is_ascii() {
            return Err(config_error("export.delimiter must be an ASCII character".to_string()));
        }
        if config.scan.extensions.is_empty() {
            return Err(config_error("scan.extensions must not be empty".to_string()));
        }

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
