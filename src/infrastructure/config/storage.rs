//! On-disk configuration handling.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{info, warn};

use super::app_config::AppConfig;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";
const APP_NAME: &str = "revfeed";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors around reading and writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Filesystem failure while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The default configuration could not be serialized.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Loads `config.toml` from the platform config directory.
///
/// The first run writes a default file so users have something to edit.
/// A file that fails to parse is left alone and defaults are used; the
/// engine never refuses to start over a typo in the config.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Creates a manager rooted at the platform config directory.
    ///
    /// # Errors
    /// Returns [`ConfigError::ConfigDirNotFound`] when the platform has
    /// no config directory convention.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
        })
    }

    /// Creates a manager rooted at an explicit directory.
    #[must_use]
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// The directory this manager reads from and writes to.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads the configuration, honoring an explicit path override.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the directory or the default file
    /// cannot be created, or an existing file cannot be read.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = match path_override {
            Some(path) => path.to_path_buf(),
            None => self.config_dir.join(CONFIG_FILE_NAME),
        };

        if !config_path.exists() {
            info!(path = %config_path.display(), "No config file, writing defaults");
            let defaults = AppConfig::default();
            Self::write_atomically(&config_path, &toml::to_string_pretty(&defaults)?)?;
            return Ok(defaults);
        }

        let raw = fs::read_to_string(&config_path)?;
        Ok(toml::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "Unparseable config, using defaults");
            AppConfig::default()
        }))
    }

    /// Writes via a temp file in the target directory plus a rename, so
    /// a crash never leaves a truncated config behind.
    fn write_atomically(path: &Path, content: &str) -> Result<(), ConfigError> {
        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("config path has no parent"))?;
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
