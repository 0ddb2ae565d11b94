//! Fixed-delay retry of transport failures.

use std::future::Future;
use std::time::Duration;

use crate::client::error::{PaySimpleError, TransportError, TransportFailure};

/// How many times a call is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per call (default: 3). Values below 1 still make one attempt.
    pub max_attempts: u32,
    /// Wait between attempts (default: 1s).
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Effective attempt budget.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Outcome of a failed attempt.
#[derive(Debug)]
pub(crate) enum AttemptError {
    /// No response was received; the attempt may be repeated.
    Transport(TransportError),
    /// Ends the call immediately.
    Fatal(PaySimpleError),
}

impl From<PaySimpleError> for AttemptError {
    fn from(err: PaySimpleError) -> Self {
        Self::Fatal(err)
    }
}

/// Run `attempt` until it succeeds, fails fatally, or the budget is spent.
///
/// `attempt` receives the 1-based attempt number. Transport errors are kept
/// in order and returned together as [`TransportFailure`].
pub(crate) async fn run<F, Fut, T>(policy: &RetryPolicy, mut attempt: F) -> Result<T, PaySimpleError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let budget = policy.attempts();
    let mut failures = Vec::new();

    for number in 1..=budget {
        match attempt(number).await {
            Ok(value) => {
                if number > 1 {
                    tracing::info!(attempt = number, "request succeeded after retry");
                }
                return Ok(value);
            }
            Err(AttemptError::Fatal(err)) => return Err(err),
            Err(AttemptError::Transport(err)) => {
                tracing::warn!(
                    attempt = number,
                    max_attempts = budget,
                    error = %err,
                    "transport failure"
                );
                failures.push(err);

                if number < budget {
                    tracing::debug!(delay_ms = policy.delay.as_millis(), "sleeping before retry");
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(PaySimpleError::Transport(TransportFailure::new(failures)))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::client::error::ConfigurationError;

    use super::*;

    #[test]
    fn budget_is_at_least_one() {
        assert_eq!(RetryPolicy::default().attempts(), 3);
        assert_eq!(RetryPolicy::new().with_max_attempts(0).attempts(), 1);
        assert_eq!(RetryPolicy::none().attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transport_errors_until_success() {
        let calls = Cell::new(0);
        let started = tokio::time::Instant::now();

        let result = run(&RetryPolicy::default(), |number| {
            calls.set(calls.get() + 1);
            async move {
                if number < 3 {
                    Err(AttemptError::Transport(format!("refused #{number}").into()))
                } else {
                    Ok(number)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.get(), 3);
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(2) && waited < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_budget_returns_every_error_in_order() {
        let started = tokio::time::Instant::now();
        let policy = RetryPolicy::new().with_max_attempts(4);

        let err = run(&policy, |number| async move {
            Err::<(), _>(AttemptError::Transport(format!("refused #{number}").into()))
        })
        .await
        .unwrap_err();

        let failure = match err {
            PaySimpleError::Transport(failure) => failure,
            other => panic!("unexpected error: {other:?}"),
        };
        let messages: Vec<String> = failure.errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec!["refused #1", "refused #2", "refused #3", "refused #4"]
        );
        // no sleep after the last attempt
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(3) && waited < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_stops_immediately() {
        let calls = Cell::new(0);

        let err = run(&RetryPolicy::default(), |_| {
            calls.set(calls.get() + 1);
            async {
                Err::<(), _>(AttemptError::from(PaySimpleError::from(
                    ConfigurationError::MissingApiKey,
                )))
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PaySimpleError::Configuration(_)));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new().with_max_attempts(0);
        let err = run(&policy, |_| async {
            Err::<(), _>(AttemptError::Transport("down".into()))
        })
        .await
        .unwrap_err();
        let failure = match err {
            PaySimpleError::Transport(failure) => failure,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(failure.attempts(), 1);
    }
}
