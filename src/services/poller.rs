//! The convergence poller: repeatedly produce a value from a remote source
//! and verify it against an expectation until it matches or a wall-clock
//! budget runs out.
//!
//! Producers and verifiers are plain function values, keeping the poller
//! generic over any observable property. A producer performs one read-only
//! attempt to fetch current state; a verifier decides whether that state
//! matches expectation yet.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::domain::models::convergence::{
    AttemptOutcome, ConvergenceAttempt, LastObservation, PollOptions, TransportPolicy,
};
use crate::infrastructure::http::ApiError;

/// A verifier's judgement of one produced value.
///
/// `NotYet` distinguishes "wrong in a way that could still become right"
/// from a programming error; it carries the detail that ends up in the
/// timeout diagnostic. This enum is also the hook for a future fatal
/// classification of structurally impossible values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfied,
    NotYet(String),
}

impl Verdict {
    pub fn not_yet(detail: impl Into<String>) -> Self {
        Self::NotYet(detail.into())
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Terminal failure of a convergence poll.
#[derive(Error, Debug)]
pub enum ConvergenceError {
    /// The budget ran out before the verifier was ever satisfied.
    #[error(
        "did not converge within {budget:?}: {attempts} attempts over {elapsed:?}; {last}"
    )]
    Timeout {
        budget: Duration,
        elapsed: Duration,
        attempts: u32,
        last: LastObservation,
    },

    /// The producer failed with a non-retryable error (contract break).
    #[error("producer failed fatally: {0}")]
    Fatal(#[source] ApiError),

    /// Fail-fast transport policy tripped: the producer failed this many
    /// times in a row without a single successful read.
    #[error("producer failed {consecutive} consecutive times: {last}")]
    TransportExhausted {
        consecutive: u32,
        #[source]
        last: ApiError,
    },
}

/// Fixed-interval polling state machine:
/// `Idle -> Attempting -> {Succeeded | Retrying | TimedOut}`, where
/// `Retrying` loops back to `Attempting` after one interval.
///
/// Each instance is self-contained; independent pollers may run concurrently
/// on separate tasks with no shared mutable state.
#[derive(Debug, Clone)]
pub struct ConvergencePoller {
    options: PollOptions,
}

impl ConvergencePoller {
    pub fn new(options: PollOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Poll until the verifier is satisfied or the budget is exhausted.
    ///
    /// The producer runs at least once regardless of the budget, and
    /// verification is always applied to the freshest produced value, never
    /// a cached one. Success returns immediately with no extra wait. The
    /// deadline computed here at poll start is the only cancellation signal.
    pub async fn poll<T, P, Fut, V>(&self, mut produce: P, verify: V) -> Result<T, ConvergenceError>
    where
        T: fmt::Debug,
        P: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        V: Fn(&T) -> Verdict,
    {
        let started = Instant::now();
        let deadline = started + self.options.budget;
        let mut attempts: u32 = 0;
        let mut consecutive_errors: u32 = 0;
        let mut last = LastObservation::Nothing;

        loop {
            attempts += 1;

            let outcome = match produce().await {
                Ok(value) => {
                    consecutive_errors = 0;
                    match verify(&value) {
                        Verdict::Satisfied => {
                            let attempt = ConvergenceAttempt {
                                index: attempts,
                                elapsed: started.elapsed(),
                                outcome: AttemptOutcome::Satisfied,
                            };
                            debug!(
                                attempt = attempt.index,
                                elapsed = ?attempt.elapsed,
                                "converged"
                            );
                            return Ok(value);
                        }
                        Verdict::NotYet(detail) => {
                            last = LastObservation::Value(format!("{value:?}"));
                            AttemptOutcome::NotYet(detail)
                        }
                    }
                }
                Err(err) if err.is_retryable() => {
                    consecutive_errors += 1;
                    if let TransportPolicy::FailFast { max_consecutive } =
                        self.options.transport_policy
                    {
                        if consecutive_errors >= max_consecutive {
                            return Err(ConvergenceError::TransportExhausted {
                                consecutive: consecutive_errors,
                                last: err,
                            });
                        }
                    }
                    last = LastObservation::Error(err.to_string());
                    AttemptOutcome::ProducerError(err.to_string())
                }
                Err(err) => return Err(ConvergenceError::Fatal(err)),
            };

            let attempt = ConvergenceAttempt {
                index: attempts,
                elapsed: started.elapsed(),
                outcome,
            };
            debug!(
                attempt = attempt.index,
                elapsed = ?attempt.elapsed,
                outcome = %attempt.outcome,
                "not converged yet"
            );

            if Instant::now() >= deadline {
                return Err(ConvergenceError::Timeout {
                    budget: self.options.budget,
                    elapsed: started.elapsed(),
                    attempts,
                    last,
                });
            }

            sleep(self.options.interval).await;
        }
    }
}

impl Default for ConvergencePoller {
    fn default() -> Self {
        Self::new(PollOptions::default())
    }
}
