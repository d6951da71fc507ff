use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::field::{CustomField, FieldValue};
use crate::error::AppResult;

/// Default GCC endpoints and Jira field wiring. Everything here can be
/// overridden through environment variables; the field ids match the target
/// Jira instance's "Support" issue screen.
const DEFAULT_GCC_ADDRESS: &str = "http://192.168.34.31";
const DEFAULT_JIRA_URL: &str = "http://10.187.120.81";
const DEFAULT_JIRA_PROJECT_KEY: &str = "SSD";
const DEFAULT_JIRA_ISSUETYPE_ID: &str = "10408";
const DEFAULT_STATE_FILE: &str = "processed_tickets.txt";
const DEFAULT_PRIORITY: &str = "Medium";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Jira field id that receives the GCC ticket id verbatim ("Letter ID").
pub const LETTER_ID_FIELD: &str = "customfield_10670";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gcc_address: String,
    pub gcc_username: Option<String>,
    pub gcc_password: Option<String>,
    pub jira_url: String,
    pub jira_username: Option<String>,
    pub jira_password: Option<String>,
    pub jira_project_key: String,
    pub jira_issuetype_id: String,
    pub jira_priority: String,
    pub letter_id_field: String,
    pub custom_fields: Vec<CustomField>,
    pub state_file: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let timeout_secs = env::var("SYNC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            gcc_address: var_or("GCC_ADDRESS", DEFAULT_GCC_ADDRESS),
            gcc_username: env::var("GCC_USERNAME").ok().filter(|v| !v.is_empty()),
            gcc_password: env::var("GCC_PASSWORD").ok().filter(|v| !v.is_empty()),
            jira_url: var_or("JIRA_URL", DEFAULT_JIRA_URL),
            jira_username: env::var("JIRA_USERNAME").ok().filter(|v| !v.is_empty()),
            jira_password: env::var("JIRA_PASSWORD").ok().filter(|v| !v.is_empty()),
            jira_project_key: var_or("JIRA_PROJECT_KEY", DEFAULT_JIRA_PROJECT_KEY),
            jira_issuetype_id: var_or("JIRA_ISSUETYPE_ID", DEFAULT_JIRA_ISSUETYPE_ID),
            jira_priority: var_or("JIRA_PRIORITY", DEFAULT_PRIORITY),
            letter_id_field: var_or("JIRA_LETTER_ID_FIELD", LETTER_ID_FIELD),
            custom_fields: default_custom_fields(),
            state_file: PathBuf::from(var_or("PROCESSED_TICKETS_FILE", DEFAULT_STATE_FILE)),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Fixed custom-field values stamped onto every created issue. Device
/// category and environment are multi-selects on the Jira side, so their
/// values are single-element lists.
fn default_custom_fields() -> Vec<CustomField> {
    vec![
        // Related Project
        CustomField::new("customfield_10627", FieldValue::option_id("10510")),
        // Request Unit
        CustomField::new("customfield_10644", FieldValue::option_id("10554")),
        // Operating System/Platform: Android
        CustomField::new("customfield_10643", FieldValue::option_id("10541")),
        // Device Category: mobile
        CustomField::new("customfield_10803", FieldValue::option_id_list("10746")),
        // Environment: Live
        CustomField::new("customfield_10823", FieldValue::option_id_list("10617")),
        // Bug Type: other
        CustomField::new("customfield_10505", FieldValue::option_id("10780")),
    ]
}
