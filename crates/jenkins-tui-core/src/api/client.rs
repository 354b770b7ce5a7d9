//! HTTP client for the Jenkins REST API
//!
//! Every request carries basic auth (username + API token) and is bounded by
//! a 30 second timeout. Job names are encoded as a single path segment, so
//! names containing spaces or slashes address the right job.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::models::{
    BuildDetail, JobDetail, JobSummary, Node, RawBuildDetail, RawComputerSet, RawJobDetail,
    RawJobList, RawServerInfo, ServerInfo,
};
use crate::config::ServerConfig;
use crate::{Error, Result};

/// Overall timeout applied to each request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const JOBS_QUERY: &str = "tree=jobs[name,url,color,description,lastBuild[number,timestamp]]";
const NODES_QUERY: &str = "tree=computer[displayName,offline,idle,numExecutors]";

// ═══════════════════════════════════════════════════════════════════════════
// API TRAIT
// ═══════════════════════════════════════════════════════════════════════════

/// Operations the service facade needs from a Jenkins server
#[async_trait]
pub trait JenkinsApi: Send + Sync {
    async fn server_info(&self) -> Result<ServerInfo>;

    async fn nodes(&self) -> Result<Vec<Node>>;

    async fn jobs(&self) -> Result<Vec<JobSummary>>;

    async fn job_detail(&self, name: &str) -> Result<JobDetail>;

    async fn build_detail(&self, name: &str, number: u32) -> Result<BuildDetail>;

    /// Full console text of a build
    async fn build_log(&self, name: &str, number: u32) -> Result<String>;

    /// Queue a build; non-empty `params` selects `buildWithParameters`
    async fn trigger_build(&self, name: &str, params: &BTreeMap<String, String>) -> Result<()>;

    async fn stop_build(&self, name: &str, number: u32) -> Result<()>;

    async fn delete_job(&self, name: &str) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════
// CLIENT
// ═══════════════════════════════════════════════════════════════════════════

/// Jenkins client bound to one configured server
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    token: String,
}

impl JenkinsClient {
    /// Build a client for a server entry
    ///
    /// # Errors
    ///
    /// Returns a config error if the server URL or proxy is invalid or the
    /// HTTP client cannot be constructed
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&server.url)
            .map_err(|e| Error::config(format!("invalid server URL '{}': {e}", server.url)))?;

        let mut builder = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(server.insecure_skip_verify);

        if !server.proxy.trim().is_empty() {
            let proxy = reqwest::Proxy::all(server.proxy.as_str())
                .map_err(|e| Error::config(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            username: server.username.clone(),
            token: server.token.clone(),
        })
    }

    /// Server URL as configured
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the server URL, encoding each one
    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("server URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    fn job_endpoint(&self, name: &str, rest: &[&str], query: Option<&str>) -> Result<Url> {
        let segments: Vec<&str> = ["job", name].iter().chain(rest).copied().collect();
        self.endpoint(&segments, query)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Jenkins request");
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.token))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, resource: Option<&str>) -> Result<T> {
        let response = self.request(Method::GET, url).send().await?;
        let response = check_status(response, resource)?;
        response
            .json()
            .await
            .map_err(|e| Error::connection(format!("failed to parse response: {e}")))
    }

    async fn post(&self, url: Url, resource: &str) -> Result<()> {
        let response = self.request(Method::POST, url).send().await?;
        check_status(response, Some(resource)).map(|_| ())
    }
}

/// Map a response status onto the error taxonomy
///
/// `resource` names the job or build a path addresses; a 404 for it is
/// `NotFound`. Everything else that is not 2xx is a connection error.
fn check_status(response: Response, resource: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match resource {
        Some(resource) if status == StatusCode::NOT_FOUND => Err(Error::not_found(resource)),
        _ => Err(Error::connection(format!(
            "unexpected status code: {}",
            status.as_u16()
        ))),
    }
}

fn job_resource(name: &str) -> String {
    format!("job '{name}'")
}

fn build_resource(name: &str, number: u32) -> String {
    format!("build #{number} of job '{name}'")
}

#[async_trait]
impl JenkinsApi for JenkinsClient {
    async fn server_info(&self) -> Result<ServerInfo> {
        let url = self.endpoint(&["api", "json"], None)?;
        let response = self.request(Method::GET, url).send().await?;
        let response = check_status(response, None)?;

        let header_version = response
            .headers()
            .get("X-Jenkins")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let raw: RawServerInfo = response
            .json()
            .await
            .map_err(|e| Error::connection(format!("failed to parse response: {e}")))?;

        Ok(ServerInfo {
            url: self.base_url.to_string(),
            version: raw.version.or(header_version).unwrap_or_default(),
            mode: raw.mode.unwrap_or_default(),
            username: self.username.clone(),
        })
    }

    async fn nodes(&self) -> Result<Vec<Node>> {
        let url = self.endpoint(&["computer", "api", "json"], Some(NODES_QUERY))?;
        let raw: RawComputerSet = self.get_json(url, None).await?;
        Ok(raw.computer.into_iter().map(Node::from).collect())
    }

    async fn jobs(&self) -> Result<Vec<JobSummary>> {
        let url = self.endpoint(&["api", "json"], Some(JOBS_QUERY))?;
        let raw: RawJobList = self.get_json(url, None).await?;
        Ok(raw.jobs.into_iter().map(JobSummary::from).collect())
    }

    async fn job_detail(&self, name: &str) -> Result<JobDetail> {
        let url = self.job_endpoint(name, &["api", "json"], Some("depth=1"))?;
        let raw: RawJobDetail = self
            .get_json(url, Some(job_resource(name).as_str()))
            .await?;
        Ok(JobDetail::from(raw))
    }

    async fn build_detail(&self, name: &str, number: u32) -> Result<BuildDetail> {
        let number_segment = number.to_string();
        let url = self.job_endpoint(name, &[&number_segment, "api", "json"], None)?;
        let raw: RawBuildDetail = self
            .get_json(url, Some(build_resource(name, number).as_str()))
            .await?;
        Ok(BuildDetail::from(raw))
    }

    async fn build_log(&self, name: &str, number: u32) -> Result<String> {
        let number_segment = number.to_string();
        let url = self.job_endpoint(name, &[&number_segment, "consoleText"], None)?;
        let response = self.request(Method::GET, url).send().await?;
        let response = check_status(response, Some(build_resource(name, number).as_str()))?;
        response
            .text()
            .await
            .map_err(|e| Error::connection(format!("failed to read response: {e}")))
    }

    async fn trigger_build(&self, name: &str, params: &BTreeMap<String, String>) -> Result<()> {
        if params.is_empty() {
            let url = self.job_endpoint(name, &["build"], None)?;
            return self.post(url, &job_resource(name)).await;
        }

        let url = self.job_endpoint(name, &["buildWithParameters"], None)?;
        let response = self.request(Method::POST, url).form(params).send().await?;
        check_status(response, Some(job_resource(name).as_str())).map(|_| ())
    }

    async fn stop_build(&self, name: &str, number: u32) -> Result<()> {
        let number_segment = number.to_string();
        let url = self.job_endpoint(name, &[&number_segment, "stop"], None)?;
        self.post(url, &build_resource(name, number)).await
    }

    async fn delete_job(&self, name: &str) -> Result<()> {
        let url = self.job_endpoint(name, &["doDelete"], None)?;
        self.post(url, &job_resource(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> Result<JenkinsClient> {
        JenkinsClient::new(&ServerConfig {
            name: "test".to_string(),
            url: url.to_string(),
            username: "alice".to_string(),
            token: "secret".to_string(),
            ..ServerConfig::default()
        })
    }

    #[test]
    fn test_job_endpoint_encodes_name_as_one_segment() -> Result<()> {
        let client = client("http://ci.example.com/jenkins/")?;
        let url = client.job_endpoint("my job/with slash", &["api", "json"], Some("depth=1"))?;
        assert_eq!(
            url.as_str(),
            "http://ci.example.com/jenkins/job/my%20job%2Fwith%20slash/api/json?depth=1"
        );
        Ok(())
    }

    #[test]
    fn test_endpoint_without_trailing_slash() -> Result<()> {
        let client = client("http://localhost:8080")?;
        let url = client.endpoint(&["api", "json"], None)?;
        assert_eq!(url.as_str(), "http://localhost:8080/api/json");
        Ok(())
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let result = JenkinsClient::new(&ServerConfig {
            url: "http://localhost:8080".to_string(),
            proxy: "::not a proxy::".to_string(),
            ..ServerConfig::default()
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        assert!(matches!(client("localhost"), Err(Error::Config { .. })));
    }
}
