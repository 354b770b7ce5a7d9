//! Job and build status decoding
//!
//! Jenkins reports a job's state as a color token (`blue`, `red_anime`, ...)
//! and a build's state as a `result` string plus a `building` flag.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ═══════════════════════════════════════════════════════════════════════════
// JOB STATUS
// ═══════════════════════════════════════════════════════════════════════════

/// Status of a job's most recent build, as shown in the job list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Failure,
    Unstable,
    Aborted,
    Disabled,
    Running,
    Waiting,
    #[default]
    Unknown,
}

impl JobStatus {
    /// Decode a color token into a status and an in-progress flag
    ///
    /// The `_anime` suffix marks a build in progress. Unrecognized tokens map
    /// to `(Unknown, false)`.
    pub fn from_color(color: &str) -> (Self, bool) {
        let (base, animated) = color
            .strip_suffix("_anime")
            .map_or((color, false), |base| (base, true));

        let status = match base {
            "blue" => Self::Success,
            "red" => Self::Failure,
            "yellow" => Self::Unstable,
            "grey" | "disabled" => Self::Disabled,
            "aborted" => Self::Aborted,
            _ => return (Self::Unknown, false),
        };

        (status, animated)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BUILD STATUS
// ═══════════════════════════════════════════════════════════════════════════

/// Status of a single build
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Success,
    Failed,
    Aborted,
    Running,
    Waiting,
    #[default]
    Unknown,
}

impl BuildStatus {
    /// Decode a build `result`; a running build is always `Running`
    pub fn from_result(result: &str, building: bool) -> Self {
        if building {
            return Self::Running;
        }

        match result {
            "SUCCESS" => Self::Success,
            "FAILURE" | "UNSTABLE" => Self::Failed,
            "ABORTED" => Self::Aborted,
            "NOT_BUILT" => Self::Waiting,
            _ => Self::Unknown,
        }
    }
}
