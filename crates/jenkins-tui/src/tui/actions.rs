//! Command execution
//!
//! Turns the controller's commands into spawned tasks against the shared
//! service. Every task reports back through the event channel; nothing here
//! touches `AppState`.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use jenkins_tui_core::{JenkinsApi, JenkinsClient, JenkinsService};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, instrument::WithSubscriber};

use super::types::{AppEvent, Command, JobAction};

/// Runs commands in the background and sends their results as events
pub struct CommandRunner<A: JenkinsApi + 'static = JenkinsClient> {
    service: Arc<JenkinsService<A>>,
    events: UnboundedSender<AppEvent>,
}

impl<A: JenkinsApi + 'static> CommandRunner<A> {
    pub const fn new(service: Arc<JenkinsService<A>>, events: UnboundedSender<AppEvent>) -> Self {
        Self { service, events }
    }

    /// Start `command`; returns immediately
    pub fn run(&self, command: Command) {
        let service = Arc::clone(&self.service);
        let task: BoxFuture<'static, AppEvent> = match command {
            Command::Connect { token } => async move {
                let result = service.connect().await;
                AppEvent::Connected {
                    token,
                    result,
                    at: Utc::now(),
                }
            }
            .boxed(),
            Command::FetchJobs { token } => async move {
                AppEvent::JobsLoaded {
                    token,
                    result: service.list_jobs().await,
                }
            }
            .boxed(),
            Command::FetchJobDetail { token, job } => async move {
                AppEvent::JobDetailLoaded {
                    token,
                    result: service.job_detail(&job).await,
                }
            }
            .boxed(),
            Command::FetchBuildDetail { token, job, build } => async move {
                AppEvent::BuildDetailLoaded {
                    token,
                    result: service.build_detail(&job, build).await,
                }
            }
            .boxed(),
            Command::FetchBuildLog { token, job, build } => async move {
                let result = service.build_log(&job, build).await;
                AppEvent::BuildLogLoaded {
                    token,
                    job,
                    build,
                    result,
                }
            }
            .boxed(),
            Command::RunAction(action) => async move {
                let result = run_action(&service, &action).await;
                AppEvent::ActionFinished { action, result }
            }
            .boxed(),
            Command::ScheduleTick(delay) => async move {
                tokio::time::sleep(delay).await;
                AppEvent::Tick {
                    refresh_due: service.should_refresh().await,
                }
            }
            .boxed(),
            Command::Quit => {
                debug!("Quit requested");
                return;
            }
        };

        let events = self.events.clone();
        tokio::spawn(
            async move {
                if events.send(task.await).is_err() {
                    debug!("Event channel closed, dropping result");
                }
            }
            .with_current_subscriber(),
        );
    }
}

async fn run_action<A: JenkinsApi>(
    service: &JenkinsService<A>,
    action: &JobAction,
) -> jenkins_tui_core::Result<()> {
    match action {
        JobAction::Trigger { job } => service.trigger_build(job, &BTreeMap::new()).await,
        JobAction::Stop { job, build } => service.stop_build(job, *build).await,
        JobAction::Delete { job } => service.delete_job(job).await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use jenkins_tui_core::{
        BuildDetail, Error, JobDetail, JobSummary, Node, Result, ServerInfo,
    };
    use tokio::sync::mpsc;

    use super::*;
    use crate::tui::types::{FetchKind, RequestTokens};

    struct Offline;

    #[async_trait]
    impl JenkinsApi for Offline {
        async fn server_info(&self) -> Result<ServerInfo> {
            Err(Error::connection("refused"))
        }
        async fn nodes(&self) -> Result<Vec<Node>> {
            Err(Error::connection("refused"))
        }
        async fn jobs(&self) -> Result<Vec<JobSummary>> {
            Err(Error::connection("refused"))
        }
        async fn job_detail(&self, _name: &str) -> Result<JobDetail> {
            Err(Error::connection("refused"))
        }
        async fn build_detail(&self, _name: &str, _number: u32) -> Result<BuildDetail> {
            Err(Error::connection("refused"))
        }
        async fn build_log(&self, _name: &str, _number: u32) -> Result<String> {
            Err(Error::connection("refused"))
        }
        async fn trigger_build(
            &self,
            _name: &str,
            _params: &BTreeMap<String, String>,
        ) -> Result<()> {
            Err(Error::connection("refused"))
        }
        async fn stop_build(&self, _name: &str, _number: u32) -> Result<()> {
            Err(Error::connection("refused"))
        }
        async fn delete_job(&self, _name: &str) -> Result<()> {
            Err(Error::connection("refused"))
        }
    }

    fn runner() -> (CommandRunner<Offline>, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Arc::new(JenkinsService::new(Offline, Duration::from_secs(30)));
        (CommandRunner::new(service, tx), rx)
    }

    #[test]
    fn test_fetch_result_echoes_token() {
        tokio_test::block_on(async {
            let (runner, mut rx) = runner();
            let token = RequestTokens::default().issue(FetchKind::Jobs);
            runner.run(Command::FetchJobs { token });

            let event = rx.recv().await;
            assert!(matches!(
                event,
                Some(AppEvent::JobsLoaded { token: echoed, result: Err(_) }) if echoed == token
            ));
        });
    }

    #[test]
    fn test_action_result_names_the_action() {
        tokio_test::block_on(async {
            let (runner, mut rx) = runner();
            let action = JobAction::Delete {
                job: "demo".to_string(),
            };
            runner.run(Command::RunAction(action.clone()));

            let event = rx.recv().await;
            assert!(matches!(
                event,
                Some(AppEvent::ActionFinished { action: ref done, result: Err(ref err) })
                    if *done == action && *err == Error::not_connected()
            ));
        });
    }

    #[test]
    fn test_quit_sends_nothing() {
        tokio_test::block_on(async {
            let (runner, mut rx) = runner();
            runner.run(Command::Quit);
            drop(runner);
            assert!(rx.recv().await.is_none());
        });
    }
}
