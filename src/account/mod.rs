//! Account management module
//!
//! PostgreSQL-based storage for accounts and their balances.

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::Account;
pub use repository::{AccountRepository, ordered_pair};

// Re-export Database from top-level db module
pub use crate::db::Database;
