//! Optional TOML configuration.
//!
//! ```toml
//! log_file = "/var/log/sysmaint.log"
//!
//! [clean]
//! kernels = true
//! orphaned_configs = true
//! ```
//!
//! A missing file yields the defaults; a malformed one is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sysmaint.toml";

/// Default location of the run journal.
pub const DEFAULT_LOG_PATH: &str = "/var/log/sysmaint.log";

/// Errors raised while loading the configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
}

/// Toggles for the clean analysis sub-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Look for old kernel images.
    pub kernels: bool,
    /// Look for packages with leftover configuration files.
    pub orphaned_configs: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            kernels: true,
            orphaned_configs: true,
        }
    }
}

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Journal location.
    pub log_file: PathBuf,
    /// Clean analysis settings.
    pub clean: CleanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_PATH),
            clean: CleanConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read and
    /// [`ConfigError::Parse`] if it is not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysmaint.toml");
        std::fs::write(&path, "[clean]\nkernels = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.clean.kernels);
        assert!(config.clean.orphaned_configs);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_log_file_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysmaint.toml");
        std::fs::write(&path, "log_file = \"/tmp/maint.log\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_file, PathBuf::from("/tmp/maint.log"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sysmaint.toml");
        std::fs::write(&path, "logfile = 3\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
