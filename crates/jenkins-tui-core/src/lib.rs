//! # Jenkins TUI Core
//!
//! Everything the terminal client needs that is not presentation:
//!
//! - `api`: HTTP client for the Jenkins REST API and the status mappings it relies on
//! - `service`: the serialized facade the UI talks to
//! - `config`: YAML configuration loading, validation and defaults
//! - `format`: human-readable durations and timestamps
//! - `logging`: explicitly constructed tracing dispatch
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Use:
//! - `?` operator for propagation
//! - `map`, `and_then` combinators for transformation
//! - `match` / `map_or` / `unwrap_or_else` for defaults

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod api;
pub mod config;
mod error;
pub mod format;
pub mod logging;
pub mod service;

pub use api::{
    BuildDetail, BuildStatus, BuildSummary, JenkinsApi, JenkinsClient, JobDetail, JobStatus,
    JobSummary, Node, ServerInfo,
};
pub use config::{Config, ServerConfig};
pub use error::{Error, Result};
pub use service::{JenkinsService, ServerSnapshot};
