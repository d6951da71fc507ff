use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::TicketSourceService;

const SERVICE_PATH: &str = "/GPTicketing/ws/wservice";

/// Client for the GCC ticketing web service.
///
/// GCC authentication is cookie based: a successful `action=login` call sets
/// a session cookie that the client's cookie store replays on the listing
/// call. The session is never persisted; every run logs in again.
pub struct GccClient {
    http: Client,
    address: String,
    username: Option<String>,
    password: Option<String>,
}

impl GccClient {
    pub fn new(
        address: String,
        username: Option<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            address,
            username,
            password,
        })
    }

    fn credentials(&self) -> AppResult<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GCC username not configured".to_string()))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GCC password not configured".to_string()))?;
        Ok((username, password))
    }

    fn service_url(&self) -> String {
        format!("{}{SERVICE_PATH}", self.address.trim_end_matches('/'))
    }
}

#[async_trait]
impl TicketSourceService for GccClient {
    async fn authenticate(&self) -> AppResult<()> {
        let (username, password) = self.credentials()?;

        let response = self
            .http
            .get(self.service_url())
            .query(&[("action", "login"), ("un", username), ("pw", password)])
            .send()
            .await
            .map_err(|err| AppError::Auth(format!("login call failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Auth(format!("could not read login response: {err}")))?;

        // GCC answers a plain-text "OK" on success, anything else is a refusal.
        if status.is_success() && body.trim() == "OK" {
            Ok(())
        } else {
            Err(AppError::Auth(format!(
                "login rejected ({status}): {}",
                body.trim()
            )))
        }
    }

    async fn list_tickets(&self) -> AppResult<Vec<Ticket>> {
        let response = self
            .http
            .get(self.service_url())
            .query(&[("action", "getmytickets")])
            .send()
            .await
            .map_err(|err| AppError::Fetch(format!("ticket listing call failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Fetch(format!(
                "ticket listing returned {status}: {body}"
            )));
        }

        let listing: TicketListing = response
            .json()
            .await
            .map_err(|err| AppError::Fetch(format!("ticket listing is not valid JSON: {err}")))?;

        Ok(listing.records)
    }
}

#[derive(Deserialize)]
struct TicketListing {
    #[serde(default)]
    records: Vec<Ticket>,
}
