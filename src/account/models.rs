//! Data models for account management

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Account row. `balance` is only ever mutated inside a lock-held
/// transaction, by the transfer engine or by reconciliation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}
