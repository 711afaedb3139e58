//! Generic blocking wait-for-condition primitive.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};

/// Why a wait ended without the condition being satisfied.
#[derive(Debug, Error)]
pub enum WaitError<E> {
    /// The timeout budget ran out. Sleep time counts toward the budget,
    /// not just active check time.
    #[error("timed out after {}s waiting", .timeout.as_secs())]
    TimedOut { timeout: Duration },

    /// The condition itself failed hard. The poller does not swallow
    /// errors it does not understand; a condition that wants a failure
    /// treated as "not yet" must map it to `Ok(false)` itself.
    #[error("{0}")]
    Condition(E),
}

/// Repeatedly evaluate `condition` at a fixed `interval` until it reports
/// satisfied or `timeout` elapses.
///
/// Returns the elapsed time on success so callers can report it to their
/// observer. `Ok(false)` from the condition means "not yet"; `Err` aborts
/// the wait immediately.
pub async fn wait_for<F, Fut, E>(
    mut condition: F,
    interval: Duration,
    timeout: Duration,
) -> Result<Duration, WaitError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let start = Instant::now();
    loop {
        match condition().await {
            Ok(true) => return Ok(start.elapsed()),
            Ok(false) => {}
            Err(e) => return Err(WaitError::Condition(e)),
        }

        if start.elapsed() + interval > timeout {
            return Err(WaitError::TimedOut { timeout });
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    struct Unreachable;

    #[tokio::test(start_paused = true)]
    async fn test_satisfied_after_two_false_polls() {
        let calls = AtomicU32::new(0);
        let elapsed = wait_for(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Unreachable>(n >= 2)
            },
            Duration::from_secs(1),
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        assert!(elapsed >= Duration::from_secs(1), "elapsed was {elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "elapsed was {elapsed:?}");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediately_true_returns_near_zero() {
        let elapsed = wait_for(
            || async { Ok::<_, Unreachable>(true) },
            Duration::from_secs(3),
            Duration::from_secs(60),
        )
        .await
        .unwrap();
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_true_times_out_within_one_interval() {
        let start = Instant::now();
        let err = wait_for(
            || async { Ok::<_, Unreachable>(false) },
            Duration::from_secs(1),
            Duration::from_secs(10),
        )
        .await
        .unwrap_err();

        match err {
            WaitError::TimedOut { timeout } => assert_eq!(timeout, Duration::from_secs(10)),
            WaitError::Condition(_) => panic!("expected timeout"),
        }
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(9), "waited {waited:?}");
        assert!(waited <= Duration::from_secs(11), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_condition_error_aborts_first_poll() {
        let start = Instant::now();
        let err = wait_for(
            || async { Err::<bool, _>(Unreachable) },
            Duration::from_secs(3),
            Duration::from_secs(60),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, WaitError::Condition(Unreachable)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
