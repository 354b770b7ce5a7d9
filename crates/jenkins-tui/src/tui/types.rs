//! Type definitions for the terminal client
//!
//! Events flow into the controller, commands flow out of it. Neither carries
//! behavior; `state` and `events` interpret them and `actions` executes the
//! commands.

use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use jenkins_tui_core::{BuildDetail, JobDetail, JobSummary, Result, ServerSnapshot};

/// Cadence of the periodic refresh check
pub const REFRESH_TICK: Duration = Duration::from_secs(30);

/// The active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    JobList,
    JobDetail,
    BuildLog,
    Help,
}

// ═══════════════════════════════════════════════════════════════════════════
// REQUEST TOKENS
// ═══════════════════════════════════════════════════════════════════════════

/// Kinds of fetch whose results can go stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Connect,
    Jobs,
    JobDetail,
    BuildDetail,
    BuildLog,
}

/// Generation number stamped on a fetch and echoed by its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

/// Latest issued token per fetch kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTokens {
    connect: u64,
    jobs: u64,
    job_detail: u64,
    build_detail: u64,
    build_log: u64,
}

impl RequestTokens {
    /// Issue a new token for `kind`, invalidating every earlier one
    pub fn issue(&mut self, kind: FetchKind) -> RequestToken {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(1);
        RequestToken(*slot)
    }

    /// Whether `token` is the latest issued for `kind`
    pub const fn is_current(&self, kind: FetchKind, token: RequestToken) -> bool {
        let latest = match kind {
            FetchKind::Connect => self.connect,
            FetchKind::Jobs => self.jobs,
            FetchKind::JobDetail => self.job_detail,
            FetchKind::BuildDetail => self.build_detail,
            FetchKind::BuildLog => self.build_log,
        };
        latest == token.0
    }

    fn slot_mut(&mut self, kind: FetchKind) -> &mut u64 {
        match kind {
            FetchKind::Connect => &mut self.connect,
            FetchKind::Jobs => &mut self.jobs,
            FetchKind::JobDetail => &mut self.job_detail,
            FetchKind::BuildDetail => &mut self.build_detail,
            FetchKind::BuildLog => &mut self.build_log,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MESSAGES
// ═══════════════════════════════════════════════════════════════════════════

/// Where a displayed error came from; a later success of the same source
/// clears it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Fetch(FetchKind),
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedError {
    pub source: ErrorSource,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// JOB ACTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Operation that changes server state; always confirmed first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobAction {
    Trigger { job: String },
    Stop { job: String, build: u32 },
    Delete { job: String },
}

impl JobAction {
    pub fn job(&self) -> &str {
        match self {
            Self::Trigger { job } | Self::Stop { job, .. } | Self::Delete { job } => job,
        }
    }

    /// Question shown in the confirm dialog
    pub fn prompt(&self) -> String {
        match self {
            Self::Trigger { job } => format!("Trigger a new build of '{job}'?"),
            Self::Stop { job, build } => format!("Stop build #{build} of '{job}'?"),
            Self::Delete { job } => format!("Delete job '{job}'? This cannot be undone."),
        }
    }

    pub fn progress(&self) -> String {
        match self {
            Self::Trigger { job } => format!("Triggering build of {job}..."),
            Self::Stop { job, build } => format!("Stopping {job} #{build}..."),
            Self::Delete { job } => format!("Deleting {job}..."),
        }
    }

    pub fn done(&self) -> String {
        match self {
            Self::Trigger { job } => format!("Build triggered for {job}"),
            Self::Stop { job, build } => format!("Stopped {job} #{build}"),
            Self::Delete { job } => format!("Deleted {job}"),
        }
    }

    pub const fn failure_prefix(&self) -> &'static str {
        match self {
            Self::Trigger { .. } => "Failed to trigger build",
            Self::Stop { .. } => "Failed to stop build",
            Self::Delete { .. } => "Failed to delete job",
        }
    }
}

/// Confirmation dialog for server-side actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: JobAction,
}

impl ConfirmDialog {
    pub fn new(action: JobAction) -> Self {
        Self {
            message: action.prompt(),
            action,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EVENTS AND COMMANDS
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the controller reacts to
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize {
        width: u16,
        height: u16,
    },
    /// Periodic tick; `refresh_due` is the facade's verdict at tick time
    Tick {
        refresh_due: bool,
    },
    Connected {
        token: RequestToken,
        result: Result<ServerSnapshot>,
        at: DateTime<Utc>,
    },
    JobsLoaded {
        token: RequestToken,
        result: Result<Vec<JobSummary>>,
    },
    JobDetailLoaded {
        token: RequestToken,
        result: Result<JobDetail>,
    },
    BuildDetailLoaded {
        token: RequestToken,
        result: Result<BuildDetail>,
    },
    BuildLogLoaded {
        token: RequestToken,
        job: String,
        build: u32,
        result: Result<String>,
    },
    ActionFinished {
        action: JobAction,
        result: Result<()>,
    },
}

/// Effects requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect {
        token: RequestToken,
    },
    FetchJobs {
        token: RequestToken,
    },
    FetchJobDetail {
        token: RequestToken,
        job: String,
    },
    FetchBuildDetail {
        token: RequestToken,
        job: String,
        build: u32,
    },
    FetchBuildLog {
        token: RequestToken,
        job: String,
        build: u32,
    },
    RunAction(JobAction),
    ScheduleTick(Duration),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_per_kind() {
        let mut tokens = RequestTokens::default();
        let first_log = tokens.issue(FetchKind::BuildLog);
        let jobs = tokens.issue(FetchKind::Jobs);
        let second_log = tokens.issue(FetchKind::BuildLog);

        assert!(!tokens.is_current(FetchKind::BuildLog, first_log));
        assert!(tokens.is_current(FetchKind::BuildLog, second_log));
        assert!(tokens.is_current(FetchKind::Jobs, jobs));
    }

    #[test]
    fn test_default_token_is_never_current_after_issue() {
        let mut tokens = RequestTokens::default();
        tokens.issue(FetchKind::Connect);
        assert!(!tokens.is_current(FetchKind::Connect, RequestToken::default()));
    }

    #[test]
    fn test_action_texts_name_the_job() {
        let action = JobAction::Stop {
            job: "deploy".to_string(),
            build: 9,
        };
        assert_eq!(action.job(), "deploy");
        assert!(ConfirmDialog::new(action.clone()).message.contains("#9"));
        assert_eq!(action.done(), "Stopped deploy #9");
    }
}
