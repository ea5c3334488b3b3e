//! Append-only transfer ledger
//!
//! Rows are created exclusively by the transfer engine and immutable after
//! commit; only the archival engine moves them out.

pub mod repository;

pub use repository::{LedgerRepository, NewTransfer, Paginated, TransferRecord};

/// Status stamped on every committed transfer row
pub const STATUS_COMPLETED: &str = "completed";
