//! End-to-end tests for the sync pass, with GCC and Jira played by a mock
//! HTTP server and the dedup file on a temp path.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use tempfile::TempDir;

use gcc_jira_sync::config::AppConfig;
use gcc_jira_sync::context::AppContext;
use gcc_jira_sync::domain::field::{CustomField, FieldValue};
use gcc_jira_sync::error::AppError;
use gcc_jira_sync::infra::gcc::GccClient;
use gcc_jira_sync::infra::jira::JiraClient;
use gcc_jira_sync::workflow::sync;

const GCC_PATH: &str = "/GPTicketing/ws/wservice";
const JIRA_PATH: &str = "/rest/api/2/issue";

struct Harness {
    server: ServerGuard,
    _dir: TempDir,
    state_file: PathBuf,
    ctx: AppContext,
}

async fn harness() -> Harness {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("processed_tickets.txt");

    let config = AppConfig {
        gcc_address: server.url(),
        gcc_username: Some("probe".to_string()),
        gcc_password: Some("secret".to_string()),
        jira_url: server.url(),
        jira_username: Some("svc".to_string()),
        jira_password: Some("secret".to_string()),
        jira_project_key: "SSD".to_string(),
        jira_issuetype_id: "10408".to_string(),
        jira_priority: "Medium".to_string(),
        letter_id_field: "customfield_10670".to_string(),
        custom_fields: vec![
            CustomField::new("customfield_10627", FieldValue::option_id("10510")),
            CustomField::new("customfield_10823", FieldValue::option_id_list("10617")),
        ],
        state_file: state_file.clone(),
        http_timeout: Duration::from_secs(5),
    };

    let source = Arc::new(
        GccClient::new(
            config.gcc_address.clone(),
            config.gcc_username.clone(),
            config.gcc_password.clone(),
            config.http_timeout,
        )
        .unwrap(),
    );
    let publisher = Arc::new(JiraClient::new(&config).unwrap());
    let ctx = AppContext::new(config, source, publisher);

    Harness {
        server,
        _dir: dir,
        state_file,
        ctx,
    }
}

impl Harness {
    async fn mock_login_ok(&mut self) -> mockito::Mock {
        self.server
            .mock("GET", GCC_PATH)
            .match_query(Matcher::UrlEncoded("action".into(), "login".into()))
            .with_status(200)
            .with_body("OK")
            .expect_at_least(1)
            .create_async()
            .await
    }

    async fn mock_tickets(&mut self, body: &str) -> mockito::Mock {
        self.server
            .mock("GET", GCC_PATH)
            .match_query(Matcher::UrlEncoded("action".into(), "getmytickets".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect_at_least(1)
            .create_async()
            .await
    }

    fn store_contents(&self) -> String {
        std::fs::read_to_string(&self.state_file).unwrap_or_default()
    }
}

#[tokio::test]
async fn new_ticket_creates_issue_and_records_id() {
    let mut h = harness().await;
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickID":"T1","tickShMesdagh":"Screen issue"}]}"#)
        .await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .match_header("authorization", Matcher::Regex("^Basic ".into()))
        .match_body(Matcher::PartialJson(json!({
            "fields": {
                "summary": "Screen issue",
                "project": { "key": "SSD" },
                "issuetype": { "id": "10408" },
                "priority": { "name": "Medium" },
                "customfield_10670": "T1",
                "customfield_10627": { "id": "10510" },
                "customfield_10823": [{ "id": "10617" }],
            }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"1","key":"SSD-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    create.assert_async().await;
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.failed, 0);
    assert_eq!(h.store_contents(), "T1\n");
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let mut h = harness().await;
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickID":"T1","tickShMesdagh":"Screen issue"}]}"#)
        .await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .with_status(201)
        .with_body(r#"{"id":"1","key":"SSD-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let first = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();
    let second = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    create.assert_async().await;
    assert_eq!(first.created, 1);
    assert_eq!(second.created, 0);
    assert_eq!(second.already_processed, 1);
    assert_eq!(h.store_contents(), "T1\n");
}

#[tokio::test]
async fn preprocessed_ticket_is_skipped() {
    let mut h = harness().await;
    std::fs::write(&h.state_file, "T1\n").unwrap();
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickID":"T1"}]}"#).await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .expect(0)
        .create_async()
        .await;

    let outcome = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    create.assert_async().await;
    assert_eq!(outcome.already_processed, 1);
    assert_eq!(outcome.created, 0);
    assert_eq!(h.store_contents(), "T1\n");
}

#[tokio::test]
async fn malformed_listing_means_empty_run() {
    let mut h = harness().await;
    h.mock_login_ok().await;
    h.mock_tickets("this is not json").await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .expect(0)
        .create_async()
        .await;

    let outcome = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    create.assert_async().await;
    assert_eq!(outcome.fetched, 0);
    assert_eq!(h.store_contents(), "");
}

#[tokio::test]
async fn ticket_without_id_is_skipped_and_never_recorded() {
    let mut h = harness().await;
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickShMesdagh":"No id here"}]}"#)
        .await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .expect(0)
        .create_async()
        .await;

    let first = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();
    let second = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    create.assert_async().await;
    assert_eq!(first.missing_id, 1);
    // Reappears as a skip on every run; there is no key to dedup against.
    assert_eq!(second.missing_id, 1);
    assert_eq!(h.store_contents(), "");
}

#[tokio::test]
async fn failed_creation_is_not_recorded_and_retried_next_run() {
    let mut h = harness().await;
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickID":"T1"}]}"#).await;
    let create = h
        .server
        .mock("POST", JIRA_PATH)
        .with_status(500)
        .with_body("internal error")
        .expect(2)
        .create_async()
        .await;

    let first = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();
    assert_eq!(first.failed, 1);
    assert_eq!(h.store_contents(), "");

    // Same source snapshot next run: the ticket is attempted again.
    let second = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();
    assert_eq!(second.failed, 1);

    create.assert_async().await;
}

#[tokio::test]
async fn successful_id_is_appended_after_prior_content() {
    let mut h = harness().await;
    std::fs::write(&h.state_file, "T0\n").unwrap();
    h.mock_login_ok().await;
    h.mock_tickets(r#"{"records":[{"tickID":"T0"},{"tickID":"T1"}]}"#)
        .await;
    h.server
        .mock("POST", JIRA_PATH)
        .with_status(201)
        .with_body(r#"{"id":"1","key":"SSD-2"}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = sync::run(&h.ctx, h.state_file.clone()).await.unwrap();

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.already_processed, 1);
    assert_eq!(h.store_contents(), "T0\nT1\n");
}

#[tokio::test]
async fn rejected_login_aborts_the_run() {
    let mut h = harness().await;
    h.server
        .mock("GET", GCC_PATH)
        .match_query(Matcher::UrlEncoded("action".into(), "login".into()))
        .with_status(200)
        .with_body("Invalid credentials")
        .create_async()
        .await;
    let listing = h
        .server
        .mock("GET", GCC_PATH)
        .match_query(Matcher::UrlEncoded("action".into(), "getmytickets".into()))
        .expect(0)
        .create_async()
        .await;

    let result = sync::run(&h.ctx, h.state_file.clone()).await;

    listing.assert_async().await;
    assert!(matches!(result, Err(AppError::Auth(_))));
}
