//! Keyboard handling
//!
//! Order of precedence for a key press:
//! 1. ctrl-c quits from anywhere
//! 2. An open confirm dialog takes every key
//! 3. Filter input on the active list takes every key
//! 4. Configured global commands
//! 5. Keys of the active view, then navigation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::components::ListControl;
use super::keymap::{is_ctrl_c, GlobalCommand};
use super::state::{view_status, AppState};
use super::types::{Command, ConfirmDialog, JobAction, StatusMessage, View};

impl AppState {
    pub(crate) fn on_key(mut self, key: KeyEvent) -> (Self, Vec<Command>) {
        if key.kind != KeyEventKind::Press {
            return (self, Vec::new());
        }

        if is_ctrl_c(&key) {
            return self.request_quit();
        }

        if let Some(dialog) = self.confirm.take() {
            return self.on_confirm_key(dialog, key);
        }

        if self.active_list().is_some_and(|list| list.is_typing()) {
            return (self.on_filter_key(key), Vec::new());
        }

        if let Some(command) = self.keymap.global_command(&key) {
            return self.on_global(command);
        }

        self.on_view_key(key)
    }

    fn active_list(&self) -> Option<&dyn ListControl> {
        match self.view {
            View::JobList => Some(self.job_list.list()),
            View::JobDetail => Some(self.job_detail.builds()),
            _ => None,
        }
    }

    fn active_list_mut(&mut self) -> Option<&mut dyn ListControl> {
        match self.view {
            View::JobList => Some(self.job_list.list_mut()),
            View::JobDetail => Some(self.job_detail.builds_mut()),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DIALOG AND FILTER INPUT
    // ═══════════════════════════════════════════════════════════════════════

    fn on_confirm_key(mut self, dialog: ConfirmDialog, key: KeyEvent) -> (Self, Vec<Command>) {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                self.status = StatusMessage::info(dialog.action.progress());
                (self, vec![Command::RunAction(dialog.action)])
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.status = StatusMessage::info("Cancelled");
                (self, Vec::new())
            }
            _ => {
                self.confirm = Some(dialog);
                (self, Vec::new())
            }
        }
    }

    fn on_filter_key(mut self, key: KeyEvent) -> Self {
        if let Some(list) = self.active_list_mut() {
            match key.code {
                KeyCode::Char(c) => list.push_filter(c),
                KeyCode::Backspace => list.pop_filter(),
                KeyCode::Enter => list.commit_filter(),
                KeyCode::Esc => list.clear_filter(),
                _ => {}
            }
        }
        self
    }

    // ═══════════════════════════════════════════════════════════════════════
    // GLOBAL COMMANDS
    // ═══════════════════════════════════════════════════════════════════════

    fn on_global(mut self, command: GlobalCommand) -> (Self, Vec<Command>) {
        match command {
            GlobalCommand::Quit => return self.request_quit(),
            GlobalCommand::Help => self.toggle_help(),
            GlobalCommand::Dashboard => {
                self.switch_to(View::Dashboard);
                self.status = StatusMessage::info(view_status(View::Dashboard, &self));
            }
            GlobalCommand::Jobs => {
                self.switch_to(View::JobList);
                self.status = StatusMessage::info(view_status(View::JobList, &self));
                if self.connected {
                    let fetch = self.fetch_jobs();
                    return (self, vec![fetch]);
                }
            }
            GlobalCommand::Refresh => {
                self.status = StatusMessage::info("Refreshing...");
                let connect = self.connect();
                return (self, vec![connect]);
            }
        }
        (self, Vec::new())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VIEW KEYS
    // ═══════════════════════════════════════════════════════════════════════

    fn on_view_key(mut self, key: KeyEvent) -> (Self, Vec<Command>) {
        let modified = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        if modified {
            return (self, Vec::new());
        }

        match key.code {
            KeyCode::Enter => return self.on_enter(),
            KeyCode::Esc => self.on_back(),
            KeyCode::Char('/') => {
                if let Some(list) = self.active_list_mut() {
                    list.start_filter();
                }
            }
            KeyCode::Char('b') => self.confirm = self.trigger_target().map(ConfirmDialog::new),
            KeyCode::Char('s') => self.confirm = self.stop_target().map(ConfirmDialog::new),
            KeyCode::Char('x') => self.confirm = self.delete_target().map(ConfirmDialog::new),
            _ => {
                if let Some(motion) = self.keymap.motion(&key) {
                    if self.view == View::BuildLog {
                        self.build_log.apply(motion);
                    } else if let Some(list) = self.active_list_mut() {
                        list.apply(motion);
                    }
                }
            }
        }
        (self, Vec::new())
    }

    fn on_enter(mut self) -> (Self, Vec<Command>) {
        match self.view {
            View::JobList => {
                let Some(job) = self.job_list.selected_name() else {
                    return (self, Vec::new());
                };
                if self.selected_job.as_deref() != Some(job.as_str()) {
                    self.selected_build = None;
                }
                self.job_detail = self.job_detail.for_job(&job);
                self.selected_job = Some(job.clone());
                self.switch_to(View::JobDetail);
                self.status = StatusMessage::info(format!("Job: {job}"));

                let commands = if self.connected {
                    vec![self.fetch_job_detail(&job)]
                } else {
                    Vec::new()
                };
                (self, commands)
            }
            View::JobDetail => {
                let Some(job) = self.job_detail.job_name().map(str::to_string) else {
                    return (self, Vec::new());
                };
                let Some(build) = self.job_detail.selected_build() else {
                    return (self, Vec::new());
                };
                self.selected_build = Some(build);
                self.build_log = self.build_log.expecting(&job, build);
                self.switch_to(View::BuildLog);
                self.status = StatusMessage::info(format!("Build #{build} Logs"));

                let commands = if self.connected {
                    vec![
                        self.fetch_build_log(&job, build),
                        self.fetch_build_detail(&job, build),
                    ]
                } else {
                    Vec::new()
                };
                (self, commands)
            }
            _ => (self, Vec::new()),
        }
    }

    fn on_back(&mut self) {
        match self.view {
            View::JobDetail => {
                self.switch_to(View::JobList);
                self.status = StatusMessage::info(view_status(View::JobList, self));
            }
            View::BuildLog => {
                self.switch_to(View::JobDetail);
                self.status = StatusMessage::info(view_status(View::JobDetail, self));
            }
            View::Help => self.close_help(),
            View::JobList => self.job_list.list_mut().clear_filter(),
            View::Dashboard => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ACTION TARGETS
    // ═══════════════════════════════════════════════════════════════════════

    fn trigger_target(&self) -> Option<JobAction> {
        let job = match self.view {
            View::JobList => self.job_list.selected_name(),
            View::JobDetail => self
                .job_detail
                .job_name()
                .map(str::to_string)
                .or_else(|| self.selected_job.clone()),
            _ => None,
        }?;
        Some(JobAction::Trigger { job })
    }

    fn stop_target(&self) -> Option<JobAction> {
        let (job, build) = match self.view {
            View::JobDetail => (
                self.job_detail.job_name()?.to_string(),
                self.job_detail.selected_build()?,
            ),
            View::BuildLog if !self.build_log.job().is_empty() => {
                (self.build_log.job().to_string(), self.build_log.build())
            }
            _ => return None,
        };
        Some(JobAction::Stop { job, build })
    }

    fn delete_target(&self) -> Option<JobAction> {
        if self.view != View::JobList {
            return None;
        }
        self.job_list
            .selected_name()
            .map(|job| JobAction::Delete { job })
    }
}
