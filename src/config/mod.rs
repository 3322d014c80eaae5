use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

/// Operator settings persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: String,
    #[serde(default)]
    pub operator_callsign: String,
    /// Base URL of the remote mirror. Empty means "no remote configured":
    /// the log stays local-only and every sync call becomes a no-op.
    #[serde(default)]
    pub remote_url: String,
    #[serde(default)]
    pub remote_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            operator_callsign: String::new(),
            remote_url: String::new(),
            remote_key: String::new(),
        }
    }
}

impl Settings {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("potalog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".potalog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("potalog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("potalog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Write the settings back to the config file, creating the directory
    /// on first use.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
