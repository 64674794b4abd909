//! Placement report binary entry point.
//!
//! Opens the configured database, evaluates every derivation against one
//! snapshot and prints the result as JSON on stdout. All logs go to stderr.
//!
//! Coverage is excluded because the main function needs a real database
//! and process environment.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::Arc;

use disk_placement::config::Config;
use disk_placement::error::AppError;
use disk_placement::placement::PlacementService;
use disk_placement::storage::SqliteStorage;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Initialize logging to stderr only (stdout carries the report)
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("placement-report starting...");

    match run().await {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Report failed: {e}");
            std::process::exit(1);
        }
    }

    tracing::info!("placement-report complete");
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run() -> Result<String, AppError> {
    let config = Config::from_env()?;

    tracing::info!(
        "Configuration loaded: database={}, max_connections={}, busy_timeout={}ms",
        config.database_path,
        config.max_connections,
        config.busy_timeout_ms
    );

    let storage = SqliteStorage::connect(&config).await?;
    let service = PlacementService::new(Arc::new(storage));
    let report = service.report().await?;

    serde_json::to_string_pretty(&report).map_err(|e| AppError::Report {
        message: e.to_string(),
    })
}
