//! Balance reconciliation
//!
//! Recomputes every account balance from ledger history, corrects bounded
//! drift, and flags anything larger for human review.

pub mod engine;
pub mod monitor;

pub use engine::{ReconcileSummary, ReconciliationEngine};
pub use monitor::{AccountDiscrepancy, find_large_discrepancies};
