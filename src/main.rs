use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gcc_jira_sync::cmd::sync::{self, SyncCommandArgs};
use gcc_jira_sync::config::AppConfig;
use gcc_jira_sync::context::AppContext;
use gcc_jira_sync::error::AppResult;
use gcc_jira_sync::infra::gcc::GccClient;
use gcc_jira_sync::infra::jira::JiraClient;

/// Mirror new GCC support tickets into Jira. One pass per invocation; run it
/// from cron or a similar scheduler, and make sure runs do not overlap.
#[derive(Parser)]
#[command(name = "gcc-jira-sync", version, about)]
struct Cli {
    /// Override the processed-tickets file used for dedup.
    #[arg(long)]
    state_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    if config.gcc_username.is_none() || config.gcc_password.is_none() {
        eprintln!("Warning: GCC credentials not configured; set GCC_USERNAME and GCC_PASSWORD.");
    }
    if config.jira_username.is_none() || config.jira_password.is_none() {
        eprintln!("Warning: Jira credentials not configured; set JIRA_USERNAME and JIRA_PASSWORD.");
    }

    let source = Arc::new(GccClient::new(
        config.gcc_address.clone(),
        config.gcc_username.clone(),
        config.gcc_password.clone(),
        config.http_timeout,
    )?);
    let publisher = Arc::new(JiraClient::new(&config)?);

    let context = AppContext::new(config, source, publisher);

    let outcome = sync::run(
        &context,
        SyncCommandArgs {
            state_file: cli.state_file,
        },
    )
    .await?;

    println!(
        "Sync finished: {} fetched, {} created, {} already processed, {} without id, {} failed.",
        outcome.fetched,
        outcome.created,
        outcome.already_processed,
        outcome.missing_id,
        outcome.failed
    );

    Ok(())
}
