//! # Rebate Runner
//!
//! Runs one rebate calculation against the SQLite store.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RunnerConfig::load()        ← REBATE_* environment variables          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BlockingStore::open(..)     ← SQLite file, migrations applied         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RebateService::try_calculate(request)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Rebate Result: true                                                    │
//! │  Rebate Amount: 200.0                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Run `seed` first to create the demo product and rebates.

mod config;
mod output;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rebate_core::service::log_failure;
use rebate_core::{CalculateRebateResult, RebateService};
use rebate_db::{BlockingStore, DbConfig};

use crate::config::RunnerConfig;
use crate::output::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RunnerConfig::load()?;

    // Initialize tracing (stderr, so stdout stays machine-readable)
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(
        db = %config.database_path,
        rebate_id = %config.rebate_identifier,
        product_id = %config.product_identifier,
        volume = %config.volume,
        "Configuration loaded"
    );

    let store = BlockingStore::open(DbConfig::new(&config.database_path))?;
    let service = RebateService::new(&store, &store);

    let request = config.request();
    let result = match service.try_calculate(&request) {
        Ok(amount) => CalculateRebateResult::success(amount),
        Err(err) => {
            log_failure(&request, &err);
            eprintln!("Reason: {err}");
            CalculateRebateResult::failure()
        }
    };

    println!("{}", render(&result, config.output)?);

    store.close();

    Ok(())
}
