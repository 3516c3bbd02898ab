//! Application configuration
//!
//! Settings come from three layers. Defaults fill everything in, the TOML
//! config file (`~/.config/sitetrack/config.toml`) overrides them, and
//! `SITETRACK_*` environment variables override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Prefix shared by all environment overrides
const ENV_PREFIX: &str = "SITETRACK";

/// File name of the persisted task document inside the data directory
pub const TASKS_FILE_NAME: &str = "tasks.v1.json";

/// Runtime settings for the tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the task document and debug log live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Explicit log file location, `debug.log` under `data_dir` when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default file location.
    ///
    /// `SITETRACK_DATA_DIR` and `SITETRACK_LOG_FILE` beat whatever the file
    /// says, and `SITETRACK_CONFIG` relocates the file itself.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is not an error, the defaults apply. Environment
    /// overrides run either way, and the data directory is created if
    /// it does not exist yet.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .with_context(|| format!("config file {} is not valid TOML", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("could not read config file {}", path.display()))
            }
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("configuration is not valid TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(dir) = env_override("DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        // An empty SITETRACK_LOG_FILE clears the setting
        if let Some(file) = env_override("LOG_FILE") {
            self.log_file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
    }

    fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "could not create data directory {}",
                self.data_dir.display()
            )
        })
    }

    /// Write the configuration back to its file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create config directory {}", parent.display()))?;
        }

        let text = toml::to_string_pretty(self).context("could not serialize configuration")?;
        std::fs::write(&path, text)
            .with_context(|| format!("could not write config file {}", path.display()))
    }

    /// Where the config file lives, honoring `SITETRACK_CONFIG`
    pub fn config_file_path() -> PathBuf {
        if let Some(path) = env_override("CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sitetrack")
            .join("config.toml")
    }

    /// Path of the persisted task document
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE_NAME)
    }

    /// Path of the debug log, next to the task document unless overridden
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

fn env_override(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{suffix}")).ok()
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("sitetrack")
}
