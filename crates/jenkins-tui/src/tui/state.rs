//! Application state and the result half of the controller
//!
//! `AppState::update` consumes the previous state and returns its
//! replacement together with the commands to run. It never performs I/O;
//! network results come back later as ordinary events.

use chrono::{DateTime, Utc};
use jenkins_tui_core::{
    config::DEFAULT_MAX_LOG_LINES, BuildDetail, Config, JobDetail, JobSummary, Result,
    ServerSnapshot,
};
use tracing::debug;

use super::components::{
    BuildLogPane, Component, DashboardPane, HelpPane, JobDetailPane, JobListPane, Viewport,
};
use super::keymap::KeyMap;
use super::types::{
    AppEvent, Command, ConfirmDialog, DisplayedError, ErrorSource, FetchKind, JobAction,
    RequestToken, RequestTokens, StatusMessage, View, REFRESH_TICK,
};

const fn fetch_error_prefix(kind: FetchKind) -> &'static str {
    match kind {
        FetchKind::Connect => "Connection error",
        FetchKind::Jobs => "Failed to fetch jobs",
        FetchKind::JobDetail => "Failed to fetch job details",
        FetchKind::BuildDetail => "Failed to fetch build details",
        FetchKind::BuildLog => "Failed to fetch build log",
    }
}

/// Everything the UI shows, plus the bookkeeping needed to drop stale
/// results
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    /// View to return to when Help closes
    help_origin: Option<View>,
    pub connected: bool,
    /// Job chosen in the job list; survives navigation
    pub selected_job: Option<String>,
    /// Build chosen in the job detail view; survives navigation
    pub selected_build: Option<u32>,
    pub error: Option<DisplayedError>,
    pub status: StatusMessage,
    pub confirm: Option<ConfirmDialog>,
    pub keymap: KeyMap,
    pub size: Viewport,
    pub dashboard: DashboardPane,
    pub job_list: JobListPane,
    pub job_detail: JobDetailPane,
    pub build_log: BuildLogPane,
    pub help: HelpPane,
    tokens: RequestTokens,
    quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(KeyMap::default(), DEFAULT_MAX_LOG_LINES)
    }
}

impl AppState {
    pub fn new(keymap: KeyMap, max_log_lines: usize) -> Self {
        Self {
            view: View::Dashboard,
            help_origin: None,
            connected: false,
            selected_job: None,
            selected_build: None,
            error: None,
            status: StatusMessage::info("Welcome to Jenkins TUI"),
            confirm: None,
            help: HelpPane::default().with_keymap(&keymap),
            keymap,
            size: Viewport::default(),
            dashboard: DashboardPane::default(),
            job_list: JobListPane::default(),
            job_detail: JobDetailPane::default(),
            build_log: BuildLogPane::new(max_log_lines),
            tokens: RequestTokens::default(),
            quit: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            KeyMap::from_config(&config.keybindings),
            config.ui.max_log_lines,
        )
    }

    /// Initial commands: connect and start the refresh tick
    pub fn start(mut self) -> (Self, Vec<Command>) {
        let connect = self.connect();
        (self, vec![connect, Command::ScheduleTick(REFRESH_TICK)])
    }

    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    pub const fn help_origin(&self) -> Option<View> {
        self.help_origin
    }

    pub const fn snapshot(&self) -> Option<&ServerSnapshot> {
        self.dashboard.snapshot()
    }

    /// Apply one event
    pub fn update(self, event: AppEvent) -> (Self, Vec<Command>) {
        if self.quit {
            return (self, Vec::new());
        }

        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Resize { width, height } => (self.on_resize(width, height), Vec::new()),
            AppEvent::Tick { refresh_due } => self.on_tick(refresh_due),
            AppEvent::Connected { token, result, at } => self.on_connected(token, result, at),
            AppEvent::JobsLoaded { token, result } => self.on_jobs(token, result),
            AppEvent::JobDetailLoaded { token, result } => self.on_job_detail(token, result),
            AppEvent::BuildDetailLoaded { token, result } => self.on_build_detail(token, result),
            AppEvent::BuildLogLoaded {
                token,
                job,
                build,
                result,
            } => self.on_build_log(token, &job, build, result),
            AppEvent::ActionFinished { action, result } => self.on_action_finished(action, result),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMMAND ISSUING
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn connect(&mut self) -> Command {
        Command::Connect {
            token: self.tokens.issue(FetchKind::Connect),
        }
    }

    pub(crate) fn fetch_jobs(&mut self) -> Command {
        Command::FetchJobs {
            token: self.tokens.issue(FetchKind::Jobs),
        }
    }

    pub(crate) fn fetch_job_detail(&mut self, job: &str) -> Command {
        Command::FetchJobDetail {
            token: self.tokens.issue(FetchKind::JobDetail),
            job: job.to_string(),
        }
    }

    pub(crate) fn fetch_build_detail(&mut self, job: &str, build: u32) -> Command {
        Command::FetchBuildDetail {
            token: self.tokens.issue(FetchKind::BuildDetail),
            job: job.to_string(),
            build,
        }
    }

    pub(crate) fn fetch_build_log(&mut self, job: &str, build: u32) -> Command {
        Command::FetchBuildLog {
            token: self.tokens.issue(FetchKind::BuildLog),
            job: job.to_string(),
            build,
        }
    }

    pub(crate) fn request_quit(mut self) -> (Self, Vec<Command>) {
        self.quit = true;
        (self, vec![Command::Quit])
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VIEW SWITCHING
    // ═══════════════════════════════════════════════════════════════════════

    /// Change view; leaving Help forgets where it was opened from
    pub(crate) fn switch_to(&mut self, view: View) {
        if self.view == View::Help && view != View::Help {
            self.help_origin = None;
        }
        self.view = view;
    }

    pub(crate) fn toggle_help(&mut self) {
        if self.view == View::Help {
            self.close_help();
        } else {
            self.help_origin = Some(self.view);
            self.view = View::Help;
            self.status = StatusMessage::info("Help");
        }
    }

    pub(crate) fn close_help(&mut self) {
        let origin = self.help_origin.unwrap_or(View::Dashboard);
        self.switch_to(origin);
        self.status = StatusMessage::info(view_status(origin, self));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ERRORS
    // ═══════════════════════════════════════════════════════════════════════

    fn set_error(&mut self, source: ErrorSource, prefix: &str, err: &jenkins_tui_core::Error) {
        self.error = Some(DisplayedError {
            source,
            message: format!("{prefix}: {err}"),
        });
    }

    fn clear_error(&mut self, source: ErrorSource) {
        if self.error.as_ref().is_some_and(|error| error.source == source) {
            self.error = None;
        }
    }

    /// Whether a result is the latest for its kind; stale ones are logged
    fn accept(&self, kind: FetchKind, token: RequestToken) -> bool {
        let current = self.tokens.is_current(kind, token);
        if !current {
            debug!(?kind, ?token, "Dropping stale result");
        }
        current
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RESULT HANDLERS
    // ═══════════════════════════════════════════════════════════════════════

    fn on_resize(mut self, width: u16, height: u16) -> Self {
        self.size = Viewport { width, height };
        self.dashboard.resize(width, height);
        self.job_list.resize(width, height);
        self.job_detail.resize(width, height);
        self.build_log.resize(width, height);
        self.help.resize(width, height);
        self
    }

    fn on_tick(mut self, refresh_due: bool) -> (Self, Vec<Command>) {
        let mut commands = Vec::with_capacity(2);
        if refresh_due {
            debug!("Refresh interval elapsed, reconnecting");
            commands.push(self.connect());
        }
        commands.push(Command::ScheduleTick(REFRESH_TICK));
        (self, commands)
    }

    fn on_connected(
        mut self,
        token: RequestToken,
        result: Result<ServerSnapshot>,
        at: DateTime<Utc>,
    ) -> (Self, Vec<Command>) {
        if !self.accept(FetchKind::Connect, token) {
            return (self, Vec::new());
        }

        let source = ErrorSource::Fetch(FetchKind::Connect);
        match result {
            Ok(snapshot) => {
                self.connected = true;
                self.dashboard = self.dashboard.with_snapshot(snapshot, at);
                self.clear_error(source);
                self.status = StatusMessage::success("Connected to Jenkins");
                let fetch = self.fetch_jobs();
                (self, vec![fetch])
            }
            Err(err) => {
                self.connected = false;
                self.dashboard = self.dashboard.disconnected();
                self.set_error(source, fetch_error_prefix(FetchKind::Connect), &err);
                self.status = StatusMessage::error("Connection failed");
                (self, Vec::new())
            }
        }
    }

    fn on_jobs(
        mut self,
        token: RequestToken,
        result: Result<Vec<JobSummary>>,
    ) -> (Self, Vec<Command>) {
        if !self.accept(FetchKind::Jobs, token) {
            return (self, Vec::new());
        }

        let source = ErrorSource::Fetch(FetchKind::Jobs);
        match result {
            Ok(jobs) => {
                self.dashboard = self.dashboard.with_jobs(&jobs);
                self.job_list = self.job_list.with_jobs(jobs);
                self.clear_error(source);
            }
            Err(err) => self.set_error(source, fetch_error_prefix(FetchKind::Jobs), &err),
        }
        (self, Vec::new())
    }

    fn on_job_detail(
        mut self,
        token: RequestToken,
        result: Result<JobDetail>,
    ) -> (Self, Vec<Command>) {
        if !self.accept(FetchKind::JobDetail, token) {
            return (self, Vec::new());
        }

        let source = ErrorSource::Fetch(FetchKind::JobDetail);
        match result {
            Ok(detail) => {
                // A build the user opened stays selected across refetches
                let kept = self
                    .selected_build
                    .filter(|number| detail.builds.iter().any(|build| build.number == *number));
                let current = kept.or_else(|| detail.last_build.as_ref().map(|build| build.number));
                let job = detail.name.clone();
                self.job_detail = self.job_detail.with_job(detail);
                self.clear_error(source);

                let commands = match current {
                    Some(number) => {
                        self.selected_build = Some(number);
                        vec![self.fetch_build_detail(&job, number)]
                    }
                    None => Vec::new(),
                };
                (self, commands)
            }
            Err(err) => {
                self.set_error(source, fetch_error_prefix(FetchKind::JobDetail), &err);
                (self, Vec::new())
            }
        }
    }

    fn on_build_detail(
        mut self,
        token: RequestToken,
        result: Result<BuildDetail>,
    ) -> (Self, Vec<Command>) {
        if !self.accept(FetchKind::BuildDetail, token) {
            return (self, Vec::new());
        }

        let source = ErrorSource::Fetch(FetchKind::BuildDetail);
        match result {
            Ok(build) => {
                self.job_detail = self.job_detail.with_build(build);
                self.clear_error(source);
            }
            Err(err) => self.set_error(source, fetch_error_prefix(FetchKind::BuildDetail), &err),
        }
        (self, Vec::new())
    }

    fn on_build_log(
        mut self,
        token: RequestToken,
        job: &str,
        build: u32,
        result: Result<String>,
    ) -> (Self, Vec<Command>) {
        if !self.accept(FetchKind::BuildLog, token) {
            return (self, Vec::new());
        }

        let source = ErrorSource::Fetch(FetchKind::BuildLog);
        match result {
            Ok(text) => {
                self.build_log = self.build_log.with_log(job, build, &text);
                self.clear_error(source);
            }
            Err(err) => self.set_error(source, fetch_error_prefix(FetchKind::BuildLog), &err),
        }
        (self, Vec::new())
    }

    fn on_action_finished(mut self, action: JobAction, result: Result<()>) -> (Self, Vec<Command>) {
        if let Err(err) = result {
            self.set_error(ErrorSource::Action, action.failure_prefix(), &err);
            self.status = StatusMessage::error("Action failed");
            return (self, Vec::new());
        }

        self.clear_error(ErrorSource::Action);
        self.status = StatusMessage::success(action.done());

        let mut commands = Vec::new();
        match &action {
            JobAction::Trigger { job } => {
                commands.push(self.fetch_jobs());
                let showing_job = self.selected_job.as_deref() == Some(job.as_str());
                if self.view == View::JobDetail && showing_job {
                    commands.push(self.fetch_job_detail(job));
                }
            }
            JobAction::Stop { job, .. } => {
                let showing_job = self.selected_job.as_deref() == Some(job.as_str());
                if showing_job && matches!(self.view, View::JobDetail | View::BuildLog) {
                    commands.push(self.fetch_job_detail(job));
                } else {
                    commands.push(self.fetch_jobs());
                }
            }
            JobAction::Delete { job } => {
                if self.selected_job.as_deref() == Some(job.as_str()) {
                    self.selected_job = None;
                    self.selected_build = None;
                    if matches!(self.view, View::JobDetail | View::BuildLog) {
                        self.switch_to(View::JobList);
                    }
                }
                commands.push(self.fetch_jobs());
            }
        }
        (self, commands)
    }
}

/// Status line text for a view the user lands on
pub(crate) fn view_status(view: View, state: &AppState) -> String {
    match view {
        View::Dashboard => "Dashboard View".to_string(),
        View::JobList => "Job List View".to_string(),
        View::JobDetail => state
            .selected_job
            .as_ref()
            .map_or_else(|| "Job Detail View".to_string(), |job| format!("Job: {job}")),
        View::BuildLog => state
            .selected_build
            .map_or_else(|| "Build Log View".to_string(), |n| format!("Build #{n} Logs")),
        View::Help => "Help".to_string(),
    }
}
