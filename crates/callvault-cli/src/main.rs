//! Callvault CLI - migrate call recordings from the source API into storage.
//!
//! Configuration comes from the environment (or a `.env` file):
//! `RECORDINGS_API_KEY`, `STORAGE_BACKEND` and the variables for the chosen
//! backend (`S3_BUCKET`/`S3_REGION` or `LOCAL_STORAGE_PATH`). Dates are
//! `YYYY-MM-DD`; each day in the range is migrated as its own window.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use callvault_cli::{init_tracing, validate_folder_label};
use callvault_client::RecordingsClient;
use callvault_core::Config;
use callvault_services::{FailureLog, MigrateService};
use callvault_storage::create_storage;

#[derive(Parser)]
#[command(name = "callvault")]
#[command(about = "Call recording migration CLI", long_about = None)]
struct Cli {
    /// First day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,

    /// Folder label grouping this batch under recordings/<label>/
    #[arg(long)]
    label: String,

    /// Override the configured retry attempts per window
    #[arg(long)]
    max_attempts: Option<u32>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Serialize run summary")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.from > cli.to {
        anyhow::bail!("--from ({}) must not be after --to ({})", cli.from, cli.to);
    }
    validate_folder_label(&cli.label)?;

    let config = Config::from_env()
        .context("Failed to load configuration. Set RECORDINGS_API_KEY and the storage variables")?;

    let max_attempts = cli.max_attempts.unwrap_or(config.max_retry_attempts());
    if max_attempts < 1 {
        anyhow::bail!("--max-attempts must be at least 1");
    }

    let storage = create_storage(&config)
        .await
        .context("Failed to create storage backend")?;
    let client = RecordingsClient::new(
        config.recordings_api_url().to_string(),
        config.recordings_api_key().to_string(),
    )
    .context("Failed to create recordings API client")?;
    let failure_log = FailureLog::new(config.failure_log_path());

    let service = MigrateService::new(
        Arc::new(client),
        storage,
        failure_log,
        cli.label,
        config.staging_dir().to_path_buf(),
        max_attempts,
    );

    let summary = service.run(cli.from, cli.to).await?;
    print_json(&summary)?;

    Ok(())
}
