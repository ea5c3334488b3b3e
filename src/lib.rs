//! wallet-engine - Atomic Balance-Transfer Engine
//!
//! Moves money between accounts and keeps a durable, auditable ledger on
//! PostgreSQL, under concurrent load.
//!
//! # Modules
//!
//! - [`account`] - Account rows, balances, lock-ordered row locking
//! - [`ledger`] - Append-only transfer records and read paths
//! - [`transfer`] - Transfer engine, retry, batching, post-commit notify
//! - [`reconcile`] - Balance reconciliation and discrepancy monitoring
//! - [`archive`] - Cold-data archival into the archive store
//! - [`jobs`] - Lease-guarded scheduled job execution
//! - [`db`] - Connection pool and schema bootstrap
//! - [`config`] / [`logging`] - YAML config and tracing setup

pub mod account;
pub mod archive;
pub mod config;
pub mod db;
pub mod jobs;
pub mod ledger;
pub mod logging;
pub mod reconcile;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountRepository, ordered_pair};
pub use archive::ArchivalEngine;
pub use db::Database;
pub use ledger::{LedgerRepository, Paginated, TransferRecord};
pub use reconcile::{ReconcileSummary, ReconciliationEngine, find_large_discrepancies};
pub use transfer::{
    BatchProcessor, LoggingSink, NotificationSink, Perspective, TransferCompleted, TransferEngine,
    TransferError, TransferRequest,
};
