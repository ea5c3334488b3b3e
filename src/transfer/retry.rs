//! Bounded retry with backoff for transient store conflicts

use super::error::TransferError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Attempts per operation, including the first
pub const MAX_ATTEMPTS: u32 = 3;

/// Backoff grows linearly: `BASE_DELAY * attempt`
pub const BASE_DELAY: Duration = Duration::from_millis(100);

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempt budget is spent. An explicit loop, so the attempt bound holds
/// without growing the stack.
pub async fn with_conflict_retry<T, F, Fut>(op_name: &str, mut op: F) -> Result<T, TransferError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransferError>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Err(err) if err.is_transient() => {
                if attempt >= MAX_ATTEMPTS {
                    warn!(
                        op = op_name,
                        attempts = attempt,
                        error = %err,
                        "Retry budget exhausted"
                    );
                    return Err(TransferError::RetryExhausted(attempt));
                }

                let delay = BASE_DELAY * attempt;
                warn!(
                    op = op_name,
                    attempt,
                    next_attempt_in_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient conflict, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = with_conflict_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, TransferError>(7) }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_transient_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_conflict_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TransferError::InsufficientFunds) }
        })
        .await;

        assert!(matches!(result, Err(TransferError::InsufficientFunds)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_conflict_retried_up_to_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_conflict_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TransferError::Conflict("deadlock detected".into())) }
        })
        .await;

        assert!(matches!(result, Err(TransferError::RetryExhausted(n)) if n == MAX_ATTEMPTS));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_conflict_then_success() {
        let calls = AtomicU32::new(0);
        let result = with_conflict_retry("test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(TransferError::Conflict("lock not available".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
