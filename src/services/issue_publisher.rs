use async_trait::async_trait;

use crate::domain::ticket::{CreatedIssue, Ticket};
use crate::error::PublishError;

/// The issue tracker tickets are mirrored into.
///
/// An issue exists in the tracker if and only if `create_issue` returned
/// `Ok`; on any `Err` the caller may retry the same ticket in a later run.
#[async_trait]
pub trait IssuePublisherService: Send + Sync {
    async fn create_issue(&self, ticket: &Ticket) -> Result<CreatedIssue, PublishError>;
}
