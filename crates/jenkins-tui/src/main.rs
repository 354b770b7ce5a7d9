//! Jenkins TUI - terminal client for Jenkins
//!
//! Binary name: `jenkins-tui`

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use jenkins_tui::Cli;
use jenkins_tui_core::logging;
use tracing::instrument::WithSubscriber;

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            1
        }
    };

    #[allow(clippy::exit)]
    process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let telemetry =
        logging::init(cli.log_level.as_deref()).context("Failed to initialize logging")?;
    let dispatch = telemetry.dispatch().clone();

    let config = tracing::dispatcher::with_default(&dispatch, || cli.load_config())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(jenkins_tui::run(&config).with_subscriber(dispatch))
}
