//! Lease-guarded job execution with timeout and attempt budget

use super::lease::JobLease;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// Static description of a scheduled job
#[derive(Debug, Clone, Copy)]
pub struct JobSpec {
    pub name: &'static str,
    pub lease_key: i64,
    pub timeout: Duration,
    pub max_attempts: u32,
}

/// Daily balance reconciliation
pub const RECONCILE_BALANCES: JobSpec = JobSpec {
    name: "reconcile-balances",
    lease_key: 0x0ACC_0001,
    timeout: Duration::from_secs(3600),
    max_attempts: 3,
};

/// Monthly cold-data archival; volumes can be large, hence the wider ceiling
pub const ARCHIVE_TRANSFERS: JobSpec = JobSpec {
    name: "archive-transfers",
    lease_key: 0x0ACC_0002,
    timeout: Duration::from_secs(7200),
    max_attempts: 3,
};

/// Run a job under its exclusivity lease.
///
/// `Ok(None)` means the lease was held elsewhere and this run was skipped.
/// Committed work from earlier attempts is never rolled back; the attempt
/// budget only bounds how often the job is restarted.
pub async fn run_job<T, F, Fut>(
    pool: &PgPool,
    spec: &JobSpec,
    mut job: F,
) -> anyhow::Result<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let Some(lease) = JobLease::try_acquire(pool, spec.lease_key).await? else {
        warn!(
            job = spec.name,
            "Another instance holds the lease, skipping this run"
        );
        return Ok(None);
    };

    let result = run_attempts(spec, &mut job).await;
    lease.release().await;
    result.map(Some)
}

async fn run_attempts<T, F, Fut>(spec: &JobSpec, job: &mut F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    for attempt in 1..=spec.max_attempts {
        match tokio::time::timeout(spec.timeout, job()).await {
            Ok(Ok(value)) => {
                info!(job = spec.name, attempt, "Job completed");
                return Ok(value);
            }
            Ok(Err(err)) => {
                error!(job = spec.name, attempt, error = %err, "Job attempt failed");
            }
            Err(_) => {
                error!(
                    job = spec.name,
                    attempt,
                    timeout_secs = spec.timeout.as_secs(),
                    "Job attempt timed out"
                );
            }
        }
    }

    anyhow::bail!(
        "{} failed after {} attempts",
        spec.name,
        spec.max_attempts
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_spec(max_attempts: u32, timeout: Duration) -> JobSpec {
        JobSpec {
            name: "test-job",
            lease_key: 0x7E57_0002,
            timeout,
            max_attempts,
        }
    }

    #[tokio::test]
    async fn test_success_stops_the_attempt_loop() {
        let spec = quick_spec(3, Duration::from_secs(1));
        let calls = AtomicU32::new(0);

        let result = run_attempts(&spec, &mut || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, anyhow::Error>(99) }
        })
        .await;

        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_job_exhausts_attempts() {
        let spec = quick_spec(3, Duration::from_secs(1));
        let calls = AtomicU32::new(0);

        let result: anyhow::Result<()> = run_attempts(&spec, &mut || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { anyhow::bail!("boom") }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failed_attempt() {
        let spec = quick_spec(2, Duration::from_millis(10));
        let calls = AtomicU32::new(0);

        let result: anyhow::Result<()> = run_attempts(&spec, &mut || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_attempt_after_failure_can_succeed() {
        let spec = quick_spec(3, Duration::from_secs(1));
        let calls = AtomicU32::new(0);

        let result = run_attempts(&spec, &mut || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    anyhow::bail!("transient")
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
