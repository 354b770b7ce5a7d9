//! Builders and event helpers shared by the integration tests

#![allow(dead_code)]

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jenkins_tui::tui::types::{AppEvent, Command, RequestToken};
use jenkins_tui::AppState;
use jenkins_tui_core::{BuildSummary, JobDetail, JobStatus, JobSummary, ServerSnapshot};

pub fn key(state: AppState, code: KeyCode) -> (AppState, Vec<Command>) {
    state.update(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

pub fn chars(mut state: AppState, text: &str) -> AppState {
    for c in text.chars() {
        state = key(state, KeyCode::Char(c)).0;
    }
    state
}

pub fn snapshot(total_nodes: usize, free_nodes: usize) -> ServerSnapshot {
    ServerSnapshot {
        url: "http://ci.example.com".to_string(),
        version: "2.440.1".to_string(),
        mode: "NORMAL".to_string(),
        username: "alice".to_string(),
        uptime: None,
        total_nodes,
        free_nodes,
    }
}

pub fn job(name: &str, color: &str) -> JobSummary {
    let (status, in_progress) = JobStatus::from_color(color);
    JobSummary {
        name: name.to_string(),
        url: format!("http://ci.example.com/job/{name}/"),
        description: String::new(),
        color: color.to_string(),
        status,
        in_progress,
        last_build_time: None,
    }
}

pub fn job_detail(name: &str, builds: &[u32]) -> JobDetail {
    let builds: Vec<BuildSummary> = builds
        .iter()
        .map(|number| BuildSummary {
            number: *number,
            url: format!("http://ci.example.com/job/{name}/{number}/"),
        })
        .collect();
    JobDetail {
        name: name.to_string(),
        url: format!("http://ci.example.com/job/{name}/"),
        description: "Deploys the service".to_string(),
        buildable: true,
        last_build: builds.first().cloned(),
        builds,
    }
}

pub fn connect_token(commands: &[Command]) -> Option<RequestToken> {
    commands.iter().find_map(|command| match command {
        Command::Connect { token } => Some(*token),
        _ => None,
    })
}

pub fn jobs_token(commands: &[Command]) -> Option<RequestToken> {
    commands.iter().find_map(|command| match command {
        Command::FetchJobs { token } => Some(*token),
        _ => None,
    })
}

pub fn job_detail_token(commands: &[Command]) -> Option<RequestToken> {
    commands.iter().find_map(|command| match command {
        Command::FetchJobDetail { token, .. } => Some(*token),
        _ => None,
    })
}

pub fn build_log_request(commands: &[Command]) -> Option<(RequestToken, String, u32)> {
    commands.iter().find_map(|command| match command {
        Command::FetchBuildLog { token, job, build } => Some((*token, job.clone(), *build)),
        _ => None,
    })
}

/// Started, connected and holding `jobs`
pub fn connected_with_jobs(jobs: Vec<JobSummary>) -> AppState {
    let (state, commands) = AppState::default().start();
    let (state, commands) = state.update(AppEvent::Connected {
        token: connect_token(&commands).unwrap(),
        result: Ok(snapshot(3, 2)),
        at: Utc::now(),
    });
    let (state, _) = state.update(AppEvent::JobsLoaded {
        token: jobs_token(&commands).unwrap(),
        result: Ok(jobs),
    });
    state
}

/// Connected, in the job detail view of `name` with `builds` loaded
pub fn in_job_detail(name: &str, builds: &[u32]) -> AppState {
    let state = connected_with_jobs(vec![job(name, "blue")]);
    let (state, _) = key(state, KeyCode::Char('j'));
    let (state, commands) = key(state, KeyCode::Enter);
    let (state, _) = state.update(AppEvent::JobDetailLoaded {
        token: job_detail_token(&commands).unwrap(),
        result: Ok(job_detail(name, builds)),
    });
    state
}
