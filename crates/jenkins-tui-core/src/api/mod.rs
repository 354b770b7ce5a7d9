//! Jenkins REST API access
//!
//! - `client`: `JenkinsClient` and the `JenkinsApi` trait the facade consumes
//! - `models`: decoded server, node, job and build models
//! - `status`: color token and build result decoding

mod client;
mod models;
mod status;

pub use client::{JenkinsApi, JenkinsClient, REQUEST_TIMEOUT};
pub use models::{BuildDetail, BuildSummary, JobDetail, JobSummary, Node, ServerInfo};
pub use status::{BuildStatus, JobStatus};
