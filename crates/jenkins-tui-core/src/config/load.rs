//! Configuration loading from files and environment
//!
//! A missing config file is not an error: the defaults are written to the
//! expected path and used, so the first run leaves an editable file behind.

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::{Error, Result};

/// Environment variable selecting the server entry by name
pub const ENV_SERVER: &str = "JENKINS_TUI_SERVER";

/// Environment variable overriding `ui.refreshInterval` (seconds)
pub const ENV_REFRESH_INTERVAL: &str = "JENKINS_TUI_REFRESH_INTERVAL";

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// `path` overrides the default location.
///
/// # Errors
///
/// Returns a config error if:
/// - The home directory cannot be determined and no path was given
/// - The file exists but is unreadable or malformed YAML
/// - The default file cannot be written on first run
/// - Environment overrides or the resulting values fail validation
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let config = if path.exists() {
        load_yaml_file(&path)?
    } else {
        tracing::info!(path = %path.display(), "Config file missing, writing defaults");
        let config = Config::default();
        save_config(&config, &path)?;
        config
    };

    let config = config.apply_env_vars()?;
    config.validate()?;
    Ok(config)
}

/// Path of the config file shared with the Jenkins CLI
///
/// # Errors
///
/// Returns error if the home directory cannot be determined
pub fn default_config_path() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".jenkins-cli.yaml"))
        .ok_or_else(|| Error::config("failed to get home directory"))
}

/// Load a YAML file into a Config
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - YAML is malformed
pub fn load_yaml_file(path: &Path) -> Result<Config> {
    if path.is_dir() {
        return Err(Error::config(format!(
            "config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    serde_yaml::from_str(&content).map_err(|e| {
        Error::config(format!(
            "failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

/// Write a config to disk, creating parent directories as needed
///
/// # Errors
///
/// Returns error if the directory or file cannot be written
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::config(format!(
                "failed to create config directory {}: {e}",
                dir.display()
            ))
        })?;
    }

    let data = serde_yaml::to_string(config)?;
    std::fs::write(path, data).map_err(|e| {
        Error::config(format!(
            "failed to write config file {}: {e}",
            path.display()
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply `JENKINS_TUI_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if an environment variable value is invalid
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns error if an override value is invalid
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_SERVER) {
            if value.trim().is_empty() {
                return Err(Error::config(format!(
                    "{ENV_SERVER} cannot be empty - unset the variable or provide a server name"
                )));
            }
            self.current = value;
        }

        if let Some(value) = lookup(ENV_REFRESH_INTERVAL) {
            self.ui.refresh_interval = value.trim().parse().map_err(|e| {
                Error::config(format!("invalid {ENV_REFRESH_INTERVAL} value: {e}"))
            })?;
        }

        Ok(self)
    }
}
