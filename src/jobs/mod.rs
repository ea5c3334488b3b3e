//! Scheduled maintenance jobs
//!
//! Reconciliation and archival run on an external schedule. Each job takes a
//! cluster-wide advisory-lock lease so at most one instance runs at a time,
//! and is bounded by a wall-clock timeout and a small attempt budget.

pub mod lease;
pub mod runner;

pub use lease::JobLease;
pub use runner::{ARCHIVE_TRANSFERS, JobSpec, RECONCILE_BALANCES, run_job};
