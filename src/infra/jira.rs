use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::AppConfig;
use crate::domain::field::CustomField;
use crate::domain::ticket::{CreatedIssue, Ticket};
use crate::error::{AppError, AppResult, PublishError};
use crate::services::IssuePublisherService;

/// Placeholder rendered for any ticket field GCC left out.
const MISSING: &str = "---";

pub struct JiraClient {
    http: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    project_key: String,
    issuetype_id: String,
    priority: String,
    letter_id_field: String,
    custom_fields: Vec<CustomField>,
}

impl JiraClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.jira_url.clone(),
            username: config.jira_username.clone(),
            password: config.jira_password.clone(),
            project_key: config.jira_project_key.clone(),
            issuetype_id: config.jira_issuetype_id.clone(),
            priority: config.jira_priority.clone(),
            letter_id_field: config.letter_id_field.clone(),
            custom_fields: config.custom_fields.clone(),
        })
    }

    fn credentials(&self) -> Result<(&str, &str), PublishError> {
        let username = self.username.as_deref().ok_or_else(|| {
            PublishError::Unknown("Jira username not configured".to_string())
        })?;
        let password = self.password.as_deref().ok_or_else(|| {
            PublishError::Unknown("Jira password not configured".to_string())
        })?;
        Ok((username, password))
    }

    fn auth_header(username: &str, password: &str) -> String {
        let credentials = format!("{username}:{password}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn issue_endpoint(&self) -> String {
        format!("{}/rest/api/2/issue", self.base_url.trim_end_matches('/'))
    }

    fn summary(&self, ticket: &Ticket) -> String {
        ticket
            .subject
            .clone()
            .filter(|subject| !subject.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "GCC ticket {}",
                    ticket.dedup_id().unwrap_or("unknown")
                )
            })
    }

    /// Labeled, fixed-order rendering of the ticket for the issue body.
    fn description(ticket: &Ticket, processed_at: &str) -> String {
        let field = |value: &Option<String>| -> String {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(MISSING)
                .to_string()
        };

        [
            format!("*GCC ticket ID:* {}", ticket.dedup_id().unwrap_or(MISSING)),
            format!("*Processed at:* {processed_at}"),
            "----".to_string(),
            format!("*Reporter (GCC):* {}", field(&ticket.sender)),
            format!("*Subject:* {}", field(&ticket.subject)),
            format!("*Description:*\n{}", field(&ticket.description)),
            "----".to_string(),
            format!("*Customer name:* {}", field(&ticket.contact_name)),
            format!("*Phone number:* {}", field(&ticket.contact_phone)),
            format!("*National code:* {}", field(&ticket.national_code)),
        ]
        .join("\n")
    }

    fn build_fields(&self, ticket: &Ticket, processed_at: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": self.project_key }));
        fields.insert("summary".into(), Value::String(self.summary(ticket)));
        fields.insert(
            "description".into(),
            Value::String(Self::description(ticket, processed_at)),
        );
        fields.insert("issuetype".into(), json!({ "id": self.issuetype_id }));
        fields.insert("priority".into(), json!({ "name": self.priority }));
        fields.insert(
            self.letter_id_field.clone(),
            Value::String(ticket.dedup_id().unwrap_or_default().to_string()),
        );

        for custom in &self.custom_fields {
            // FieldValue is untagged, so serialization cannot fail.
            let value = serde_json::to_value(&custom.value).unwrap_or(Value::Null);
            fields.insert(custom.field_id.clone(), value);
        }

        fields
    }
}

#[async_trait]
impl IssuePublisherService for JiraClient {
    async fn create_issue(&self, ticket: &Ticket) -> Result<CreatedIssue, PublishError> {
        let (username, password) = self.credentials()?;

        let processed_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let body = json!({ "fields": self.build_fields(ticket, &processed_at) });

        let response = self
            .http
            .post(self.issue_endpoint())
            .header(AUTHORIZATION, Self::auth_header(username, password))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    PublishError::Timeout(err.to_string())
                } else if err.is_connect() {
                    PublishError::Connection(err.to_string())
                } else {
                    PublishError::Unknown(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(PublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: JiraCreateIssueResponse = response
            .json()
            .await
            .map_err(|err| PublishError::Unknown(format!("unparseable Jira response: {err}")))?;

        Ok(CreatedIssue { key: payload.key })
    }
}

#[derive(Deserialize)]
struct JiraCreateIssueResponse {
    key: String,
}
