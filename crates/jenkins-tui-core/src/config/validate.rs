//! Configuration validation and server selection

use itertools::Itertools;
use url::Url;

use super::types::{Config, ServerConfig};
use crate::{Error, Result};

/// Fixed keys of the filter, job actions and confirm dialog
pub const RESERVED_KEYS: [char; 8] = ['/', 'b', 's', 'x', 'y', 'Y', 'n', 'N'];

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if no server is configured, the selected server's URL or
    /// proxy is not a valid http(s) URL, or the keybindings are not distinct
    /// single characters outside [`RESERVED_KEYS`]
    pub fn validate(&self) -> Result<()> {
        let server = self.current_server()?;
        validate_http_url("url", &server.url)?;

        if !server.proxy.trim().is_empty() {
            validate_http_url("proxy", &server.proxy)?;
        }

        if self.ui.max_log_lines == 0 {
            return Err(Error::config("maxLogLines must be greater than 0"));
        }

        let bindings = self.keybindings.entries();
        if let Some((action, key)) = bindings
            .iter()
            .find(|(_, key)| key.chars().count() != 1)
        {
            return Err(Error::config(format!(
                "keybinding for '{action}' must be a single character, got '{key}'"
            )));
        }

        if let Some((action, key)) = bindings
            .iter()
            .find(|(_, key)| key.chars().any(|c| RESERVED_KEYS.contains(&c)))
        {
            return Err(Error::config(format!(
                "keybinding '{key}' for '{action}' is reserved for a view command"
            )));
        }

        if let Some(key) = bindings.iter().map(|(_, key)| *key).duplicates().next() {
            return Err(Error::config(format!(
                "keybinding '{key}' is assigned to more than one action"
            )));
        }

        Ok(())
    }

    /// The server named by `current`, or the first configured server
    ///
    /// # Errors
    ///
    /// Returns error if no servers are configured
    pub fn current_server(&self) -> Result<&ServerConfig> {
        self.jenkins_servers
            .iter()
            .find(|server| server.name == self.current)
            .or_else(|| self.jenkins_servers.first())
            .ok_or_else(|| Error::config("no Jenkins server found in config"))
    }

    /// Select a server entry by name
    ///
    /// # Errors
    ///
    /// Returns error if no entry has that name
    pub fn select_server(mut self, name: &str) -> Result<Self> {
        if !self.jenkins_servers.iter().any(|server| server.name == name) {
            return Err(Error::config(format!("server \"{name}\" not found")));
        }
        self.current = name.to_string();
        Ok(self)
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| Error::config(format!("invalid {field} '{value}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::config(format!(
            "invalid {field} '{value}': unsupported scheme '{other}'"
        ))),
    }
}
