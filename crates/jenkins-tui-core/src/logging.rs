//! Logging setup
//!
//! The terminal belongs to the UI, so log output goes to
//! `~/.jenkins-tui/logs/jenkins-tui.log`. Nothing is installed globally:
//! `init` hands back a [`Telemetry`] handle and the caller decides which
//! futures and tasks run under its dispatcher.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "jenkins-tui.log";

/// Handle to the configured tracing dispatcher
#[derive(Clone)]
pub struct Telemetry {
    dispatch: Dispatch,
    log_path: Option<PathBuf>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("log_path", &self.log_path)
            .finish_non_exhaustive()
    }
}

impl Telemetry {
    /// A handle that discards every event
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            log_path: None,
        }
    }

    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// File receiving log output, `None` when logging to a sink
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}

/// Default log directory, `~/.jenkins-tui/logs`
pub fn default_log_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".jenkins-tui").join("logs"))
}

/// Build the dispatcher writing to the default log directory
///
/// `level` takes precedence over `RUST_LOG`; with neither, `info` is used.
///
/// # Errors
///
/// Returns a config error if the level directive cannot be parsed
pub fn init(level: Option<&str>) -> Result<Telemetry> {
    init_in(default_log_dir().as_deref(), level)
}

/// Build the dispatcher writing into `dir`
///
/// When the directory or file cannot be created, events go to a sink.
///
/// # Errors
///
/// Returns a config error if the level directive cannot be parsed
pub fn init_in(dir: Option<&Path>, level: Option<&str>) -> Result<Telemetry> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| Error::config(format!("invalid log level '{level}': {e}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let (writer, log_path) = match dir.and_then(open_log_file) {
        Some((file, path)) => (BoxMakeWriter::new(Mutex::new(file)), Some(path)),
        None => (BoxMakeWriter::new(std::io::sink), None),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .finish();

    Ok(Telemetry {
        dispatch: Dispatch::new(subscriber),
        log_path,
    })
}

fn open_log_file(dir: &Path) -> Option<(std::fs::File, PathBuf)> {
    std::fs::create_dir_all(dir).ok()?;
    let path = dir.join(LOG_FILE_NAME);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()
        .map(|file| (file, path))
}
