//! Remote service facade
//!
//! `JenkinsService` is the only way the UI reaches the server. It tracks
//! whether a connect has succeeded, remembers the last error, and decides
//! when the periodic refresh is due.
//!
//! Remote calls are serialized: at most one request is in flight from the
//! facade at any time, so concurrent fetches queue rather than race. Status
//! lives behind its own lock so reads never wait on a slow request.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{BuildDetail, JenkinsApi, JenkinsClient, JobDetail, JobSummary};
use crate::config::Config;
use crate::Result;

/// What a successful connect learned about the server
///
/// Built in one piece from a single connect, never patched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSnapshot {
    pub url: String,
    pub version: String,
    pub mode: String,
    pub username: String,
    /// Not reported by the JSON API; kept for display as "unknown"
    pub uptime: Option<Duration>,
    pub total_nodes: usize,
    pub free_nodes: usize,
}

#[derive(Debug, Default)]
struct Status {
    connected: bool,
    last_error: Option<String>,
    last_refresh: Option<Instant>,
}

/// Serialized facade over a Jenkins API implementation
pub struct JenkinsService<A = JenkinsClient> {
    api: A,
    call_lock: Mutex<()>,
    status: RwLock<Status>,
    refresh_interval: Duration,
}

impl JenkinsService<JenkinsClient> {
    /// Create a facade for the currently selected server
    ///
    /// # Errors
    ///
    /// Returns a config error if no server is configured or the HTTP client
    /// cannot be built for it
    pub fn from_config(config: &Config) -> Result<Self> {
        let server = config.current_server()?;
        info!(server = %server.name, url = %server.url, "Using Jenkins server");
        let client = JenkinsClient::new(server)?;
        Ok(Self::new(client, config.ui.refresh_interval()))
    }
}

impl<A: JenkinsApi> JenkinsService<A> {
    pub fn new(api: A, refresh_interval: Duration) -> Self {
        Self {
            api,
            call_lock: Mutex::new(()),
            status: RwLock::new(Status::default()),
            refresh_interval,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATUS
    // ═══════════════════════════════════════════════════════════════════════

    pub async fn is_connected(&self) -> bool {
        self.status.read().await.connected
    }

    /// Most recent failure message, overwritten by each new failure
    pub async fn last_error(&self) -> Option<String> {
        self.status.read().await.last_error.clone()
    }

    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// True when no connect has succeeded yet or the refresh interval has
    /// elapsed since the last one
    pub async fn should_refresh(&self) -> bool {
        self.status
            .read()
            .await
            .last_refresh
            .map_or(true, |at| at.elapsed() > self.refresh_interval)
    }

    async fn record_failure<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            debug!(error = %e, "Jenkins call failed");
            self.status.write().await.last_error = Some(e.to_string());
        }
        result
    }

    async fn ensure_connected(&self) -> Result<()> {
        if self.is_connected().await {
            Ok(())
        } else {
            Err(crate::Error::not_connected())
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Check the server is reachable and count its nodes
    ///
    /// Node listing is best effort: its failure is recorded as the last
    /// error but the connect still succeeds with zero nodes.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the server info request fails; the
    /// facade is then marked disconnected
    pub async fn connect(&self) -> Result<ServerSnapshot> {
        let _call = self.call_lock.lock().await;

        let info = match self.api.server_info().await {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "Connect failed");
                let mut status = self.status.write().await;
                status.connected = false;
                status.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        let (nodes, node_error) = match self.api.nodes().await {
            Ok(nodes) => (nodes, None),
            Err(e) => {
                warn!(error = %e, "Failed to list nodes");
                (Vec::new(), Some(e.to_string()))
            }
        };

        let snapshot = ServerSnapshot {
            url: info.url,
            version: info.version,
            mode: info.mode,
            username: info.username,
            uptime: None,
            total_nodes: nodes.len(),
            free_nodes: nodes.iter().filter(|node| node.is_free()).count(),
        };

        let mut status = self.status.write().await;
        status.connected = true;
        status.last_refresh = Some(Instant::now());
        if node_error.is_some() {
            status.last_error = node_error;
        }
        drop(status);

        info!(
            version = %snapshot.version,
            nodes = snapshot.total_nodes,
            free = snapshot.free_nodes,
            "Connected to Jenkins"
        );
        Ok(snapshot)
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        let result = self.api.jobs().await;
        self.record_failure(result).await
    }

    pub async fn job_detail(&self, name: &str) -> Result<JobDetail> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        let result = self.api.job_detail(name).await;
        self.record_failure(result).await
    }

    pub async fn build_detail(&self, name: &str, number: u32) -> Result<BuildDetail> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        let result = self.api.build_detail(name, number).await;
        self.record_failure(result).await
    }

    pub async fn build_log(&self, name: &str, number: u32) -> Result<String> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        let result = self.api.build_log(name, number).await;
        self.record_failure(result).await
    }

    pub async fn trigger_build(&self, name: &str, params: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        info!(job = name, params = params.len(), "Triggering build");
        let result = self.api.trigger_build(name, params).await;
        self.record_failure(result).await
    }

    pub async fn stop_build(&self, name: &str, number: u32) -> Result<()> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        info!(job = name, build = number, "Stopping build");
        let result = self.api.stop_build(name, number).await;
        self.record_failure(result).await
    }

    pub async fn delete_job(&self, name: &str) -> Result<()> {
        self.ensure_connected().await?;
        let _call = self.call_lock.lock().await;
        info!(job = name, "Deleting job");
        let result = self.api.delete_job(name).await;
        self.record_failure(result).await
    }
}
