use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("GCC authentication failed: {0}")]
    Auth(String),
    #[error("failed to fetch tickets from GCC: {0}")]
    Fetch(String),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure modes of a single issue-creation attempt. None of these abort the
/// run; the ticket stays unrecorded and is retried on the next invocation.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Jira responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not connect to Jira: {0}")]
    Connection(String),
    #[error("Jira request timed out: {0}")]
    Timeout(String),
    #[error("unexpected error creating issue: {0}")]
    Unknown(String),
}

pub type AppResult<T> = Result<T, AppError>;
