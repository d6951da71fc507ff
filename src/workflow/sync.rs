use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::store::ProcessedStore;

/// Tallies for one sync pass, reported to the operator at the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub fetched: usize,
    pub already_processed: usize,
    pub missing_id: usize,
    pub created: usize,
    pub failed: usize,
}

/// One full pass: login, list, then mirror every ticket not seen before.
///
/// Authentication failure aborts the run. A failed listing is downgraded to
/// an empty list so the next scheduled run can try again. Per-ticket publish
/// failures skip just that ticket; its id is deliberately not recorded so it
/// is retried next run.
pub async fn run(ctx: &AppContext, state_file: PathBuf) -> AppResult<SyncOutcome> {
    ctx.source.authenticate().await?;
    info!("logged in to GCC");

    let tickets = match ctx.source.list_tickets().await {
        Ok(tickets) => tickets,
        Err(err) => {
            warn!(%err, "ticket listing failed, treating as empty");
            Vec::new()
        }
    };

    let mut outcome = SyncOutcome {
        fetched: tickets.len(),
        ..SyncOutcome::default()
    };
    info!(count = tickets.len(), "fetched tickets from GCC");

    if tickets.is_empty() {
        info!("ticket list is empty, nothing to do");
        return Ok(outcome);
    }

    let mut store = ProcessedStore::load(state_file);
    info!(count = store.len(), "loaded previously processed tickets");

    for ticket in &tickets {
        let Some(id) = ticket.dedup_id() else {
            warn!("ticket without a tickID field, skipping (cannot dedup)");
            outcome.missing_id += 1;
            continue;
        };

        if store.contains(id) {
            debug!(ticket = id, "already processed, skipping");
            outcome.already_processed += 1;
            continue;
        }

        info!(ticket = id, "new ticket, creating Jira issue");
        match ctx.publisher.create_issue(ticket).await {
            Ok(issue) => {
                info!(ticket = id, issue = %issue.key, "issue created");
                outcome.created += 1;
                if let Err(err) = store.record(id) {
                    // The issue exists but the id was not saved; the next run
                    // will create a duplicate. Accepted over aborting.
                    error!(ticket = id, %err, "could not record processed ticket");
                }
            }
            Err(err) => {
                warn!(ticket = id, %err, "issue creation failed, will retry next run");
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
