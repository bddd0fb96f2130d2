//! Cooperative polling until a task reaches a terminal state.
//!
//! This is polling, not push notification: the only way to finish sooner
//! is a callback-driven caller bypassing the loop and calling
//! `verify_callback` directly.

use crate::task::{IntoOutcome, TaskOutcome};
use core::future::Future;
use core::time::Duration;
use kieai_core::SdkError;

/// Bounds for a wait-for-completion loop.
///
/// The overall bound is layered on top of the transport's per-request
/// timeout and is independent of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Overall bound on the wait.
    pub max_wait: Duration,
    /// Pause between consecutive polls.
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Defaults for video generation: up to 10 minutes, polled every 15 s.
    #[must_use]
    pub fn video() -> Self {
        Self {
            max_wait: Duration::from_secs(600),
            poll_interval: Duration::from_secs(15),
        }
    }

    /// Defaults for image generation: up to 5 minutes, polled every 3 s.
    #[must_use]
    pub fn image() -> Self {
        Self {
            max_wait: Duration::from_secs(300),
            poll_interval: Duration::from_secs(3),
        }
    }
}

impl Default for WaitOptions {
    /// The video profile — the slower-safe of the two.
    fn default() -> Self {
        Self::video()
    }
}

/// Polls `fetch` until the snapshot classifies as terminal.
///
/// Polls are strictly sequential — there is never more than one in-flight
/// fetch per invocation — and `on_progress` runs once per poll with the
/// latest snapshot. Dropping the returned future stops the loop; no
/// separate cancellation input exists.
///
/// # Errors
///
/// - [`SdkError::TaskFailed`] when the snapshot classifies as failed,
///   carrying the provider's fail code and message verbatim.
/// - [`SdkError::Timeout`] naming `options.max_wait` when the bound
///   elapses without a terminal state.
/// - Any error from `fetch` or from outcome classification, unchanged.
pub async fn poll_until_terminal<S, F, Fut, P>(
    task_id: &str,
    options: &WaitOptions,
    mut fetch: F,
    mut on_progress: P,
) -> Result<S::Output, SdkError>
where
    S: IntoOutcome,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, SdkError>>,
    P: FnMut(&S),
{
    let started = tokio::time::Instant::now();
    loop {
        if started.elapsed() >= options.max_wait {
            return Err(SdkError::Timeout {
                limit: options.max_wait,
                operation: format!("waiting for task '{task_id}' to complete"),
            });
        }

        let snapshot = fetch().await?;
        on_progress(&snapshot);

        match snapshot.into_outcome()? {
            TaskOutcome::Pending => {
                tracing::trace!(task_id, "task not terminal yet");
                tokio::time::sleep(options.poll_interval).await;
            }
            TaskOutcome::Succeeded(result) => return Ok(result),
            TaskOutcome::Failed(failure) => {
                return Err(SdkError::TaskFailed {
                    task_id: task_id.to_string(),
                    code: failure.code,
                    message: failure.message,
                });
            }
        }
    }
}
