use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssuePublisherService, TicketSourceService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub source: Arc<dyn TicketSourceService>,
    pub publisher: Arc<dyn IssuePublisherService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        source: Arc<dyn TicketSourceService>,
        publisher: Arc<dyn IssuePublisherService>,
    ) -> Self {
        Self {
            config,
            source,
            publisher,
        }
    }
}
