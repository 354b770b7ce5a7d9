//! Command-line arguments

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jenkins_tui_core::{config, Config};

#[derive(Debug, Parser)]
#[command(name = "jenkins-tui")]
#[command(version, about = "Terminal client for browsing Jenkins jobs, builds and logs")]
pub struct Cli {
    /// Config file (default: ~/.jenkins-cli.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server entry to use, overriding `current` and JENKINS_TUI_SERVER
    #[arg(short, long)]
    pub server: Option<String>,

    /// Log filter directive, e.g. `debug` or `jenkins_tui=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load configuration and apply the `--server` override
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded or the server is unknown
    pub fn load_config(&self) -> Result<Config> {
        let config =
            config::load_config(self.config.as_deref()).context("Failed to load configuration")?;

        let Some(name) = self.server.as_deref() else {
            return Ok(config);
        };
        let config = config
            .select_server(name)
            .context("Failed to select server")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
