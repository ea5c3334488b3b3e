//! wallet-engine - scheduled maintenance entry points
//!
//! The transfer engine itself is driven by library callers (an HTTP layer
//! lives outside this crate). This binary exposes what an external scheduler
//! triggers:
//!
//! ```text
//! wallet-engine --env prod --reconcile   # daily balance reconciliation
//! wallet-engine --env prod --archive     # monthly cold-data archival
//! wallet-engine --env prod --monitor     # read-only discrepancy alerting
//! wallet-engine --env prod --seed        # create a few funded dev accounts
//! wallet-engine --env prod               # connectivity / schema check
//! ```

use std::sync::Arc;

use chrono::{Months, Utc};
use rust_decimal::Decimal;
use tracing::info;

use wallet_engine::account::AccountRepository;
use wallet_engine::archive::ArchivalEngine;
use wallet_engine::config::AppConfig;
use wallet_engine::db::Database;
use wallet_engine::jobs::{ARCHIVE_TRANSFERS, RECONCILE_BALANCES, run_job};
use wallet_engine::logging::init_logging;
use wallet_engine::reconcile::{ReconciliationEngine, find_large_discrepancies};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

fn use_reconcile_mode() -> bool {
    std::env::args().any(|a| a == "--reconcile")
}

fn use_archive_mode() -> bool {
    std::env::args().any(|a| a == "--archive")
}

fn use_monitor_mode() -> bool {
    std::env::args().any(|a| a == "--monitor")
}

fn use_seed_mode() -> bool {
    std::env::args().any(|a| a == "--seed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(&get_env());
    let _guard = init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_HASH"),
        "wallet-engine starting"
    );

    let postgres_url = config
        .postgres_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("postgres_url missing from config"))?;

    let db = Arc::new(Database::connect(&postgres_url).await?);
    db.init_schema().await?;

    if use_reconcile_mode() {
        let engine = ReconciliationEngine::new(db.clone());
        let engine_ref = &engine;
        let outcome = run_job(db.pool(), &RECONCILE_BALANCES, move || async move {
            engine_ref.reconcile_all().await.map_err(anyhow::Error::from)
        })
        .await?;

        if let Some(summary) = outcome {
            info!(
                processed = summary.processed,
                discrepancies = summary.discrepancies,
                corrected = summary.corrected,
                "Reconciliation run finished"
            );
        }
        return Ok(());
    }

    if use_archive_mode() {
        let cutoff = Utc::now()
            .checked_sub_months(Months::new(config.retention_months))
            .ok_or_else(|| anyhow::anyhow!("retention window underflows the calendar"))?;

        let engine = ArchivalEngine::new(db.clone());
        let engine_ref = &engine;
        let outcome = run_job(db.pool(), &ARCHIVE_TRANSFERS, move || async move {
            engine_ref
                .archive_older_than(cutoff)
                .await
                .map_err(anyhow::Error::from)
        })
        .await?;

        if let Some(total) = outcome {
            info!(total_archived = total, "Archival run finished");
        }
        return Ok(());
    }

    if use_monitor_mode() {
        let found = find_large_discrepancies(db.pool()).await?;
        info!(
            large_discrepancies_found = found.len(),
            "Discrepancy monitoring finished"
        );
        return Ok(());
    }

    if use_seed_mode() {
        // A few funded accounts for local runs
        for opening in [
            Decimal::new(1_000_000, 2),
            Decimal::new(500_000, 2),
            Decimal::new(750_000, 2),
        ] {
            let account = AccountRepository::create(db.pool(), opening).await?;
            info!(account_id = account.id, balance = %account.balance, "Seeded account");
        }
        let total = AccountRepository::count(db.pool()).await?;
        info!(total_accounts = total, "Seeding finished");
        return Ok(());
    }

    db.health_check().await?;
    info!("Health check passed; pass --reconcile, --archive or --monitor to run a job");
    Ok(())
}
