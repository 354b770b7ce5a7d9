//! Configuration type definitions
//!
//! Field names follow the on-disk YAML format shared with the Jenkins CLI
//! (`jenkins_servers`, `insecureSkipVerify`, `refreshInterval`, ...).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::DEFAULT_REFRESH_INTERVAL_SECS;

// ═══════════════════════════════════════════════════════════════════════════
// MAIN CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Root configuration structure
///
/// Loaded from defaults → file → env vars → CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Name of the server entry to use
    pub current: String,
    pub jenkins_servers: Vec<ServerConfig>,
    pub ui: UiConfig,
    pub keybindings: KeyBindingsConfig,
}

// ═══════════════════════════════════════════════════════════════════════════
// NESTED CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

/// One Jenkins server entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    pub url: String,
    pub username: String,
    /// API token used as the basic-auth password
    pub token: String,
    /// Proxy URL, empty for none
    pub proxy: String,
    #[serde(rename = "insecureSkipVerify")]
    pub insecure_skip_verify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    /// Seconds between automatic reconnects; values <= 0 select the default
    #[serde(rename = "refreshInterval")]
    pub refresh_interval: i64,
    #[serde(rename = "maxLogLines")]
    pub max_log_lines: usize,
    #[serde(rename = "compactMode")]
    pub compact_mode: bool,
}

impl UiConfig {
    /// Effective refresh interval.
    pub fn refresh_interval(&self) -> Duration {
        u64::try_from(self.refresh_interval)
            .ok()
            .filter(|secs| *secs > 0)
            .map_or(
                Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
                Duration::from_secs,
            )
    }
}

/// Single-character overrides for the global command keys
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindingsConfig {
    pub quit: String,
    pub help: String,
    pub dashboard: String,
    pub jobs: String,
    pub refresh: String,
}

impl KeyBindingsConfig {
    /// All bindings paired with the action they trigger.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("quit", self.quit.as_str()),
            ("help", self.help.as_str()),
            ("dashboard", self.dashboard.as_str()),
            ("jobs", self.jobs.as_str()),
            ("refresh", self.refresh.as_str()),
        ]
    }
}
