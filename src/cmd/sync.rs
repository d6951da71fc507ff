use std::path::PathBuf;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::sync::{self, SyncOutcome};

#[derive(Debug, Clone)]
pub struct SyncCommandArgs {
    pub state_file: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: SyncCommandArgs) -> AppResult<SyncOutcome> {
    let state_file = args
        .state_file
        .unwrap_or_else(|| ctx.config.state_file.clone());
    sync::run(ctx, state_file).await
}
