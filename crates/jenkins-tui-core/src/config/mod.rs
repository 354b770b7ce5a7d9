//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file: ~/.jenkins-cli.yaml (written with defaults on first run)
//! 3. Environment variables: `JENKINS_TUI_*`
//! 4. CLI flags (`--server`)
//!
//! # Example Config
//!
//! ```yaml
//! current: work
//! jenkins_servers:
//!   - name: work
//!     url: https://ci.example.com
//!     username: alice
//!     token: 11aa22bb
//!     proxy: ""
//!     insecureSkipVerify: false
//! ui:
//!   refreshInterval: 30
//!   maxLogLines: 1000
//! keybindings:
//!   quit: q
//!   jobs: j
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `defaults`: Default value implementations
//! - `load`: Loading from files and environment, saving
//! - `validate`: Validation and server selection

mod defaults;
mod load;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use defaults::{DEFAULT_MAX_LOG_LINES, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_SERVER_URL};
pub use load::{
    default_config_path, load_config, load_yaml_file, save_config, ENV_REFRESH_INTERVAL,
    ENV_SERVER,
};
pub use types::{Config, KeyBindingsConfig, ServerConfig, UiConfig};
pub use validate::RESERVED_KEYS;
