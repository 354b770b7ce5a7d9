//! Default configuration values

use super::types::{Config, KeyBindingsConfig, ServerConfig, UiConfig};

/// Server URL written into a freshly created config file
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Seconds between automatic reconnects
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Console lines kept in the build log view
pub const DEFAULT_MAX_LOG_LINES: usize = 1000;

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Default for Config {
    fn default() -> Self {
        Self {
            current: "default".to_string(),
            jenkins_servers: vec![ServerConfig {
                name: "default".to_string(),
                url: DEFAULT_SERVER_URL.to_string(),
                ..ServerConfig::default()
            }],
            ui: UiConfig::default(),
            keybindings: KeyBindingsConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            refresh_interval: 30,
            max_log_lines: DEFAULT_MAX_LOG_LINES,
            compact_mode: false,
        }
    }
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            dashboard: "d".to_string(),
            jobs: "j".to_string(),
            refresh: "r".to_string(),
        }
    }
}
