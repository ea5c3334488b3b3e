use thiserror::Error;

/// SQLSTATE codes the store reports for transient lock conflicts:
/// serialization failure, deadlock detected, lock not available.
const RETRYABLE_SQLSTATES: [&str; 3] = ["40001", "40P01", "55P03"];

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Transient store conflict: {0}")]
    Conflict(String),

    #[error("Transfer amount must be positive")]
    InvalidAmount,

    #[error("Cannot transfer money to the same account")]
    SelfTransfer,

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Transfer conflicted with concurrent activity, gave up after {0} attempts")]
    RetryExhausted(u32),
}

impl TransferError {
    /// Only transient store conflicts may be retried; validation failures
    /// never are.
    pub fn is_transient(&self) -> bool {
        matches!(self, TransferError::Conflict(_))
    }
}

impl From<sqlx::Error> for TransferError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err
            && let Some(code) = db.code()
            && RETRYABLE_SQLSTATES.contains(&code.as_ref())
        {
            return TransferError::Conflict(db.message().to_string());
        }
        TransferError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_transient() {
        assert!(TransferError::Conflict("deadlock detected".into()).is_transient());
    }

    #[test]
    fn test_validation_errors_are_not_transient() {
        assert!(!TransferError::InvalidAmount.is_transient());
        assert!(!TransferError::SelfTransfer.is_transient());
        assert!(!TransferError::InsufficientFunds.is_transient());
        assert!(!TransferError::AccountNotFound(1).is_transient());
        assert!(!TransferError::RetryExhausted(3).is_transient());
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_database() {
        let err = TransferError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, TransferError::Database(_)));
    }
}
