//! Application configuration: where the startup artifacts live.
//!
//! Read once from `config.toml` in the app root; a missing file means the
//! bundled defaults. Nothing is written back — the app has no persisted
//! output.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::app_dirs::{self, AppDirError};

/// Filename looked up inside the app root directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    AppDir(#[from] AppDirError),
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Paths to the three startup artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Serialized random-forest classifier.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Serialized decision threshold.
    #[serde(default = "default_threshold_path")]
    pub threshold_path: PathBuf,
    /// Historical reference dataset consumed once for derived statistics.
    #[serde(default = "default_reference_data_path")]
    pub reference_data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            threshold_path: default_threshold_path(),
            reference_data_path: default_reference_data_path(),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("assets/model/best_rf.json")
}

fn default_threshold_path() -> PathBuf {
    PathBuf::from("assets/model/threshold.json")
}

fn default_reference_data_path() -> PathBuf {
    PathBuf::from("assets/data/health_reference.csv")
}

/// Load the config from the app root, falling back to defaults when the
/// file does not exist.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!("no config file at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml { path, source })
}
