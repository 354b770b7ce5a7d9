//! Domain models returned by the Jenkins client
//!
//! The `Raw*` structs mirror the JSON the Jenkins REST API sends; they are
//! converted into the public models right after decoding.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::status::{BuildStatus, JobStatus};

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC MODELS
// ═══════════════════════════════════════════════════════════════════════════

/// Server identity as reported by `GET /api/json`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerInfo {
    pub url: String,
    pub version: String,
    pub mode: String,
    pub username: String,
}

/// One build agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub online: bool,
    pub idle: bool,
    pub num_executors: u32,
}

impl Node {
    /// Online and not running anything
    pub const fn is_free(&self) -> bool {
        self.online && self.idle
    }
}

/// Job list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub name: String,
    pub url: String,
    pub description: String,
    pub color: String,
    pub status: JobStatus,
    pub in_progress: bool,
    /// Start of the last build, epoch milliseconds
    pub last_build_time: Option<i64>,
}

/// Number and URL of a build; cheap enough to list for every build of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub number: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub name: String,
    pub url: String,
    pub description: String,
    pub buildable: bool,
    /// Newest first, as Jenkins returns them
    pub builds: Vec<BuildSummary>,
    pub last_build: Option<BuildSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDetail {
    pub number: u32,
    pub url: String,
    pub status: BuildStatus,
    pub building: bool,
    /// Raw Jenkins result, empty while building
    pub result: String,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Milliseconds
    pub duration: i64,
    pub description: String,
    pub parameters: BTreeMap<String, String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// WIRE FORMAT
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub(crate) struct RawServerInfo {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComputerSet {
    #[serde(default)]
    pub computer: Vec<RawComputer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawComputer {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub offline: bool,
    #[serde(default)]
    pub idle: bool,
    #[serde(default)]
    pub num_executors: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawJobList {
    #[serde(default)]
    pub jobs: Vec<RawJob>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJob {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_build: Option<RawBuildRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBuildRef {
    pub number: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawJobDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub buildable: bool,
    #[serde(default)]
    pub builds: Vec<RawBuildRef>,
    #[serde(default)]
    pub last_build: Option<RawBuildRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBuildDetail {
    pub number: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub building: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

/// Build actions are heterogeneous; only parameter actions carry `parameters`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAction {
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERSIONS
// ═══════════════════════════════════════════════════════════════════════════

impl From<RawComputer> for Node {
    fn from(raw: RawComputer) -> Self {
        Self {
            name: raw.display_name,
            online: !raw.offline,
            idle: raw.idle,
            num_executors: raw.num_executors,
        }
    }
}

impl From<RawJob> for JobSummary {
    fn from(raw: RawJob) -> Self {
        let color = raw.color.unwrap_or_default();
        let (status, in_progress) = JobStatus::from_color(&color);
        Self {
            name: raw.name,
            url: raw.url,
            description: raw.description.unwrap_or_default(),
            color,
            status,
            in_progress,
            last_build_time: raw.last_build.and_then(|build| build.timestamp),
        }
    }
}

impl From<RawBuildRef> for BuildSummary {
    fn from(raw: RawBuildRef) -> Self {
        Self {
            number: raw.number,
            url: raw.url,
        }
    }
}

impl From<RawJobDetail> for JobDetail {
    fn from(raw: RawJobDetail) -> Self {
        Self {
            name: raw.name,
            url: raw.url,
            description: raw.description.unwrap_or_default(),
            buildable: raw.buildable,
            builds: raw.builds.into_iter().map(BuildSummary::from).collect(),
            last_build: raw.last_build.map(BuildSummary::from),
        }
    }
}

impl From<RawBuildDetail> for BuildDetail {
    fn from(raw: RawBuildDetail) -> Self {
        let result = raw.result.unwrap_or_default();
        let parameters = raw
            .actions
            .into_iter()
            .flat_map(|action| action.parameters)
            .filter(|param| !param.name.is_empty())
            .map(|param| (param.name, parameter_value(&param.value)))
            .collect();

        Self {
            number: raw.number,
            url: raw.url,
            status: BuildStatus::from_result(&result, raw.building),
            building: raw.building,
            result,
            start_time: raw.timestamp,
            duration: raw.duration,
            description: raw.description.unwrap_or_default(),
            parameters,
        }
    }
}

fn parameter_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
