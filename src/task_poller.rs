// src/task_poller.rs
//! Bounded, cancellable polling of background tasks.
//!
//! A poll function is called at most `max_attempts` times with `interval`
//! between calls and the loop stops at the first terminal status. Cancelling
//! the token wakes a sleeping loop immediately, so no timer outlives it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::types::{RankedCandidate, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_attempts: u32,
}

impl PollPolicy {
    /// `max_attempts` is clamped to at least one poll.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), 150)
    }
}

/// Cloneable cancellation flag shared between a poll loop and its owner.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel` has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Drive `poll` until the task completes, fails, runs out of attempts or is cancelled.
///
/// `poll` receives the 1-based attempt number.
pub async fn poll_until_complete<F, Fut>(
    policy: PollPolicy,
    cancel: &CancelToken,
    mut poll: F,
) -> ApiResult<Vec<RankedCandidate>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = ApiResult<TaskStatus>>,
{
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        if cancel.is_cancelled() {
            info!("Polling cancelled before attempt {}", attempt);
            return Err(ApiError::PollCancelled);
        }

        let status = poll(attempt).await?;
        debug!("Poll attempt {}: {:?}", attempt, status.status);

        match status.outcome() {
            Some(Ok(data)) => {
                info!("Task completed after {} polls with {} candidates", attempt, data.len());
                return Ok(data);
            }
            Some(Err(message)) => {
                warn!("Task failed after {} polls: {}", attempt, message);
                return Err(ApiError::TaskFailed(message));
            }
            None => {}
        }

        if attempt < max_attempts {
            tokio::select! {
                _ = tokio::time::sleep(policy.interval) => {}
                _ = cancel.cancelled() => {
                    info!("Polling cancelled while waiting after attempt {}", attempt);
                    return Err(ApiError::PollCancelled);
                }
            }
        }
    }

    warn!("Task still processing after {} polls", max_attempts);
    Err(ApiError::PollExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn candidate(id: &str) -> RankedCandidate {
        RankedCandidate {
            profile_id: Some(id.to_string()),
            ..RankedCandidate::default()
        }
    }

    /// Poll function replaying `responses` and counting calls.
    fn scripted(
        responses: Vec<ApiResult<TaskStatus>>,
    ) -> (
        Arc<Mutex<u32>>,
        impl FnMut(u32) -> std::future::Ready<ApiResult<TaskStatus>>,
    ) {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let mut queue: VecDeque<_> = responses.into();
        let poll = move |_attempt: u32| {
            *counter.lock().unwrap() += 1;
            std::future::ready(queue.pop_front().unwrap_or_else(|| Ok(TaskStatus::processing())))
        };
        (calls, poll)
    }

    fn fast(max_attempts: u32) -> PollPolicy {
        PollPolicy::new(Duration::ZERO, max_attempts)
    }

    #[tokio::test]
    async fn test_stops_at_completion() {
        let (calls, poll) = scripted(vec![
            Ok(TaskStatus::processing()),
            Ok(TaskStatus::processing()),
            Ok(TaskStatus::completed(vec![candidate("x")])),
            Ok(TaskStatus::failed("never reached")),
        ]);

        let data = poll_until_complete(fast(10), &CancelToken::new(), poll)
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(data, vec![candidate("x")]);
    }

    #[tokio::test]
    async fn test_stops_at_failure() {
        let (calls, poll) = scripted(vec![
            Ok(TaskStatus::processing()),
            Ok(TaskStatus::failed("E")),
        ]);

        let err = poll_until_complete(fast(10), &CancelToken::new(), poll)
            .await
            .unwrap_err();

        assert_eq!(*calls.lock().unwrap(), 2);
        assert!(matches!(err, ApiError::TaskFailed(ref m) if m == "E"));
        assert_eq!(err.to_string(), "E");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let (calls, poll) = scripted(Vec::new());

        let err = poll_until_complete(fast(4), &CancelToken::new(), poll)
            .await
            .unwrap_err();

        assert_eq!(*calls.lock().unwrap(), 4);
        assert!(matches!(err, ApiError::PollExhausted { attempts: 4 }));
    }

    #[tokio::test]
    async fn test_poll_error_propagates() {
        let (calls, poll) = scripted(vec![
            Ok(TaskStatus::processing()),
            Err(ApiError::Http {
                status: 404,
                message: "Task not found".to_string(),
            }),
        ]);

        let err = poll_until_complete(fast(10), &CancelToken::new(), poll)
            .await
            .unwrap_err();

        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(err.to_string(), "Task not found");
    }

    #[tokio::test]
    async fn test_cancelled_before_start_makes_no_calls() {
        let (calls, poll) = scripted(Vec::new());
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = poll_until_complete(fast(10), &cancel, poll).await.unwrap_err();

        assert_eq!(*calls.lock().unwrap(), 0);
        assert!(matches!(err, ApiError::PollCancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_sleep() {
        let (calls, poll) = scripted(Vec::new());
        let cancel = CancelToken::new();
        let policy = PollPolicy::new(Duration::from_secs(3600), 5);

        let remote = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            remote.cancel();
        });

        let err = poll_until_complete(policy, &cancel, poll).await.unwrap_err();

        assert!(matches!(err, ApiError::PollCancelled));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_policy_needs_at_least_one_attempt() {
        assert_eq!(PollPolicy::new(Duration::ZERO, 0).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_zero_attempt_policy_still_polls_once() {
        let (calls, poll) = scripted(Vec::new());
        let policy = PollPolicy {
            interval: Duration::ZERO,
            max_attempts: 0,
        };

        let err = poll_until_complete(policy, &CancelToken::new(), poll)
            .await
            .unwrap_err();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(matches!(err, ApiError::PollExhausted { attempts: 1 }));
    }

    #[tokio::test]
    async fn test_cancel_token_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        clone.cancelled().await;
    }
}
