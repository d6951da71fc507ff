use async_trait::async_trait;

use crate::domain::ticket::Ticket;
use crate::error::AppResult;

/// The ticketing backend tickets are mirrored from.
///
/// `authenticate` must be called once per run before `list_tickets`; the
/// session it establishes lives only for the run.
#[async_trait]
pub trait TicketSourceService: Send + Sync {
    async fn authenticate(&self) -> AppResult<()>;
    async fn list_tickets(&self) -> AppResult<Vec<Ticket>>;
}
