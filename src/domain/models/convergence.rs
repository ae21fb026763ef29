use std::fmt;
use std::time::Duration;

/// How the poller treats producer failures (service unreachable, non-2xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPolicy {
    /// Count producer failures the same as an unsatisfied verification and
    /// keep retrying until the budget runs out. Matches the observed
    /// behavior of the reference deployment, where services may simply not
    /// be up yet.
    RetryUntilDeadline,

    /// Abort once the producer has failed this many times in a row without
    /// a single successful read in between.
    FailFast { max_consecutive: u32 },
}

/// Options governing one convergence poll.
///
/// Fixed-interval polling, not exponential backoff: propagation delay in the
/// target systems is small and bounded, so the dominant cost is the network
/// round-trip itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Sleep between attempts.
    pub interval: Duration,

    /// Total wall-clock budget. The deadline is computed once at poll start.
    pub budget: Duration,

    /// Producer failure handling.
    pub transport_policy: TransportPolicy,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            budget: Duration::from_secs(30),
            transport_policy: TransportPolicy::RetryUntilDeadline,
        }
    }
}

/// Record of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceAttempt {
    /// 1-based attempt index.
    pub index: u32,

    /// Time since poll start when the attempt completed.
    pub elapsed: Duration,

    /// What the attempt observed.
    pub outcome: AttemptOutcome,
}

/// Outcome of a single produce + verify cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The verifier accepted the produced value.
    Satisfied,

    /// The value was produced but does not match expectation yet.
    NotYet(String),

    /// The producer failed with a retryable error.
    ProducerError(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfied => write!(f, "satisfied"),
            Self::NotYet(detail) => write!(f, "not yet satisfied: {detail}"),
            Self::ProducerError(detail) => write!(f, "producer error: {detail}"),
        }
    }
}

/// The freshest thing a poll saw before giving up, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastObservation {
    /// A value was produced but never satisfied the verifier.
    Value(String),

    /// The last attempt failed before producing a value.
    Error(String),

    /// No attempt completed at all.
    Nothing,
}

impl fmt::Display for LastObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "last value {value}"),
            Self::Error(error) => write!(f, "last error {error}"),
            Self::Nothing => write!(f, "no observation recorded"),
        }
    }
}
