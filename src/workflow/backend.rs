//! Status backend seam.
//!
//! The workflow commits every transition through a [`StatusBackend`] so the
//! simulated round-trip can be swapped for a real client or a test double.
//! [`commit_with_retry`] bounds each attempt with a timeout and retries
//! transient failures with jittered exponential backoff.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::types::{TicketId, TicketStatus};

/// Failure reported by a status backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend timed out after {0:?}")]
    Timeout(Duration),

    #[error("rejected by backend: {0}")]
    Rejected(String),
}

impl BackendError {
    /// Transient failures are worth retrying; rejections are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, BackendError::Unavailable(_) | BackendError::Timeout(_))
    }
}

/// Remote side of a status transition.
#[async_trait]
pub trait StatusBackend: Send + Sync {
    /// Persist a bulk transition of `ids` to `target`.
    async fn commit_batch(&self, ids: &[TicketId], target: TicketStatus)
    -> Result<(), BackendError>;

    /// Persist a single ticket's transition to `target`.
    async fn commit_single(&self, id: &TicketId, target: TicketStatus)
    -> Result<(), BackendError>;
}

/// Retry and timeout policy for backend calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        BackendConfig::default().retry_policy()
    }
}

impl RetryPolicy {
    /// Single attempt, no backoff.
    pub fn no_retry(timeout: Duration) -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            timeout,
        }
    }

    /// Backoff before retry number `attempt` (1-based), without jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` under `policy`, retrying transient failures.
pub async fn commit_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(policy.timeout)),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < max_attempts => {
                let backoff = policy.backoff(attempt);
                let jitter_cap = backoff.as_millis() as u64 / 4;
                let jitter = if jitter_cap > 0 {
                    rand::rng().random_range(0..=jitter_cap)
                } else {
                    0
                };
                let delay = backoff + Duration::from_millis(jitter);
                warn!(attempt, ?delay, error = %err, "backend call failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                debug!(attempt, error = %err, "backend call failed");
                return Err(err);
            }
        }
    }
}

/// Backend that only waits and then succeeds, standing in for the real
/// service. Failures can be queued for tests; each queued failure is
/// consumed by one call.
#[derive(Debug)]
pub struct SimulatedBackend {
    batch_delay: Duration,
    single_delay: Duration,
    create_delay: Duration,
    failures: Mutex<VecDeque<BackendError>>,
    calls: AtomicUsize,
}

impl SimulatedBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_delays(
            Duration::from_millis(config.batch_delay_ms),
            Duration::from_millis(config.single_delay_ms),
            Duration::from_millis(config.create_delay_ms),
        )
    }

    pub fn with_delays(batch: Duration, single: Duration, create: Duration) -> Self {
        Self {
            batch_delay: batch,
            single_delay: single,
            create_delay: create,
            failures: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A backend with no artificial latency.
    pub fn instant() -> Self {
        Self::with_delays(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(error);
    }

    /// Number of calls received so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn round_trip(&self, delay: Duration) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let scripted = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match scripted {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn create_delay(&self) -> Duration {
        self.create_delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(&BackendConfig::default())
    }
}

#[async_trait]
impl StatusBackend for SimulatedBackend {
    async fn commit_batch(
        &self,
        ids: &[TicketId],
        target: TicketStatus,
    ) -> Result<(), BackendError> {
        debug!(count = ids.len(), status = %target, "simulating batch status update");
        self.round_trip(self.batch_delay).await
    }

    async fn commit_single(&self, id: &TicketId, target: TicketStatus) -> Result<(), BackendError> {
        debug!(%id, status = %target, "simulating single status update");
        self.round_trip(self.single_delay).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(300),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(300));
        assert_eq!(policy.backoff(10), Duration::from_millis(300));
    }

    #[test]
    fn test_transient_classification() {
        assert!(BackendError::Unavailable("down".into()).is_transient());
        assert!(BackendError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(!BackendError::Rejected("locked".into()).is_transient());
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let backend = SimulatedBackend::instant();
        backend.fail_next(BackendError::Unavailable("blip".into()));

        let id = TicketId::new_unchecked("1001");
        let result = commit_with_retry(&fast_policy(3), || {
            backend.commit_single(&id, TicketStatus::Resolved)
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_retry_stops_on_permanent_failure() {
        let backend = SimulatedBackend::instant();
        backend.fail_next(BackendError::Rejected("locked".into()));

        let id = TicketId::new_unchecked("1001");
        let result = commit_with_retry(&fast_policy(3), || {
            backend.commit_single(&id, TicketStatus::Resolved)
        })
        .await;

        assert_eq!(result, Err(BackendError::Rejected("locked".into())));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let backend = SimulatedBackend::instant();
        for _ in 0..3 {
            backend.fail_next(BackendError::Unavailable("down".into()));
        }

        let id = TicketId::new_unchecked("1001");
        let result = commit_with_retry(&fast_policy(2), || {
            backend.commit_single(&id, TicketStatus::Resolved)
        })
        .await;

        assert!(matches!(result, Err(BackendError::Unavailable(_))));
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_scripted_failure_survives_poisoned_queue() {
        let backend = std::sync::Arc::new(SimulatedBackend::instant());
        let holder = std::sync::Arc::clone(&backend);
        let _ = std::thread::spawn(move || {
            let _guard = holder.failures.lock().unwrap();
            panic!("poison the failure queue");
        })
        .join();
        assert!(backend.failures.is_poisoned());

        backend.fail_next(BackendError::Rejected("locked".into()));
        let result = backend.commit_batch(&[], TicketStatus::InProgress).await;

        assert_eq!(result, Err(BackendError::Rejected("locked".into())));
        assert_eq!(backend.commit_batch(&[], TicketStatus::InProgress).await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported_as_transient() {
        let backend = SimulatedBackend::with_delays(
            Duration::from_secs(10),
            Duration::from_secs(10),
            Duration::ZERO,
        );
        let policy = RetryPolicy::no_retry(Duration::from_millis(50));

        let result = commit_with_retry(&policy, || {
            backend.commit_batch(&[], TicketStatus::InProgress)
        })
        .await;

        assert_eq!(result, Err(BackendError::Timeout(Duration::from_millis(50))));
    }
}
