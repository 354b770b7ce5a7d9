//! HTTP-level tests for the Jenkins client and the facade in front of it

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;
use std::time::Duration;

use jenkins_tui_core::{
    BuildStatus, Error, JenkinsApi, JenkinsClient, JenkinsService, JobStatus, ServerConfig,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

const AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

fn client_for(server: &MockServer) -> JenkinsClient {
    JenkinsClient::new(&ServerConfig {
        name: "mock".to_string(),
        url: server.uri(),
        username: "alice".to_string(),
        token: "secret".to_string(),
        ..ServerConfig::default()
    })
    .unwrap()
}

async fn mount_server_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(header("authorization", AUTH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Jenkins", "2.440.1")
                .set_body_json(json!({"mode": "NORMAL", "nodeName": "", "jobs": []})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn server_info_reads_version_header() -> TestResult {
    let server = MockServer::start().await;
    mount_server_info(&server).await;

    let info = client_for(&server).server_info().await?;

    assert_eq!(info.version, "2.440.1");
    assert_eq!(info.mode, "NORMAL");
    assert_eq!(info.username, "alice");
    Ok(())
}

#[tokio::test]
async fn jobs_are_decoded_with_status() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .and(query_param(
            "tree",
            "jobs[name,url,color,description,lastBuild[number,timestamp]]",
        ))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {"name": "api", "url": "http://ci/job/api/", "color": "blue",
                 "description": "API service",
                 "lastBuild": {"number": 12, "timestamp": 1_700_000_000_000_i64}},
                {"name": "web", "url": "http://ci/job/web/", "color": "red_anime",
                 "description": null, "lastBuild": null},
                {"name": "folder", "url": "http://ci/job/folder/"}
            ]
        })))
        .mount(&server)
        .await;

    let jobs = client_for(&server).jobs().await?;

    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0].status, JobStatus::Success);
    assert_eq!(jobs[0].last_build_time, Some(1_700_000_000_000));
    assert_eq!(jobs[1].status, JobStatus::Failure);
    assert!(jobs[1].in_progress);
    assert_eq!(jobs[1].description, "");
    assert_eq!(jobs[2].status, JobStatus::Unknown);
    Ok(())
}

#[tokio::test]
async fn job_detail_encodes_name_and_reads_builds() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job/my%20job/api/json"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "my job",
            "url": "http://ci/job/my%20job/",
            "description": "nightly",
            "buildable": true,
            "builds": [
                {"number": 3, "url": "http://ci/job/my%20job/3/"},
                {"number": 2, "url": "http://ci/job/my%20job/2/"}
            ],
            "lastBuild": {"number": 3, "url": "http://ci/job/my%20job/3/"}
        })))
        .mount(&server)
        .await;

    let detail = client_for(&server).job_detail("my job").await?;

    assert_eq!(detail.name, "my job");
    assert!(detail.buildable);
    assert_eq!(detail.builds.len(), 2);
    assert_eq!(detail.last_build.map(|b| b.number), Some(3));
    Ok(())
}

#[tokio::test]
async fn missing_job_is_not_found() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job/ghost/api/json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client_for(&server).job_detail("ghost").await;

    assert!(matches!(result, Err(Error::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn server_error_is_connection_error() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client_for(&server).jobs().await;

    match result {
        Err(Error::Connection { reason }) => assert!(reason.contains("500")),
        other => panic!("expected connection error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unparseable_body_is_connection_error() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).jobs().await;

    assert!(matches!(result, Err(Error::Connection { .. })));
    Ok(())
}

#[tokio::test]
async fn build_detail_and_log() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/job/demo/42/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 42,
            "url": "http://ci/job/demo/42/",
            "timestamp": 1_700_000_000_000_i64,
            "duration": 61_000,
            "building": false,
            "result": "ABORTED",
            "actions": [{"parameters": [{"name": "ENV", "value": "prod"}]}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/job/demo/42/consoleText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Started\nFinished: ABORTED\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let build = client.build_detail("demo", 42).await?;
    let log = client.build_log("demo", 42).await?;

    assert_eq!(build.status, BuildStatus::Aborted);
    assert_eq!(build.duration, 61_000);
    assert_eq!(build.parameters.get("ENV").map(String::as_str), Some("prod"));
    assert!(log.ends_with("Finished: ABORTED\n"));
    Ok(())
}

#[tokio::test]
async fn trigger_without_params_posts_build() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/job/demo/build"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .trigger_build("demo", &BTreeMap::new())
        .await?;
    Ok(())
}

#[tokio::test]
async fn trigger_with_params_posts_form() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/job/demo/buildWithParameters"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("BRANCH=main&DRY_RUN=true"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let params = BTreeMap::from([
        ("DRY_RUN".to_string(), "true".to_string()),
        ("BRANCH".to_string(), "main".to_string()),
    ]);
    client_for(&server).trigger_build("demo", &params).await?;
    Ok(())
}

#[tokio::test]
async fn stop_and_delete_post_to_their_endpoints() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/job/demo/7/stop"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/job/demo/doDelete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.stop_build("demo", 7).await?;
    client.delete_job("demo").await?;
    Ok(())
}

#[tokio::test]
async fn service_connect_counts_nodes() -> TestResult {
    let server = MockServer::start().await;
    mount_server_info(&server).await;
    Mock::given(method("GET"))
        .and(path("/computer/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "computer": [
                {"displayName": "built-in", "offline": false, "idle": true, "numExecutors": 2},
                {"displayName": "agent-1", "offline": false, "idle": true, "numExecutors": 4},
                {"displayName": "agent-2", "offline": true, "idle": true, "numExecutors": 4}
            ]
        })))
        .mount(&server)
        .await;

    let service = JenkinsService::new(client_for(&server), Duration::from_secs(30));
    let snapshot = service.connect().await?;

    assert_eq!(snapshot.total_nodes, 3);
    assert_eq!(snapshot.free_nodes, 2);
    assert!(service.is_connected().await);
    Ok(())
}

#[tokio::test]
async fn service_without_connect_sends_nothing() -> TestResult {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = JenkinsService::new(client_for(&server), Duration::from_secs(30));
    let result = service.trigger_build("demo", &BTreeMap::new()).await;

    assert_eq!(result, Err(Error::not_connected()));
    Ok(())
}
