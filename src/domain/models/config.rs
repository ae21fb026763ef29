use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::convergence::{PollOptions, TransportPolicy};

/// Main configuration structure for the harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarnessConfig {
    /// Host every service role resolves against. Per-role ports are fixed.
    #[serde(default = "default_service_host")]
    pub service_host: String,

    /// Shared credential attached to authenticated calls.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP transport configuration.
    #[serde(default)]
    pub http: HttpConfig,

    /// Convergence poller configuration.
    #[serde(default)]
    pub poller: PollerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_service_host() -> String {
    "localhost".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            service_host: default_service_host(),
            credentials: CredentialsConfig::default(),
            http: HttpConfig::default(),
            poller: PollerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Fixed principal used for HTTP basic auth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CredentialsConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

fn default_username() -> String {
    "end_user".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Per-request timeout in seconds. One attempt per call; retrying is the
    /// poller's job.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Convergence poller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollerConfig {
    /// Fixed sleep between attempts, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Total wall-clock budget per convergence assertion, in milliseconds.
    #[serde(default = "default_budget_ms")]
    pub budget_ms: u64,

    /// When set, abort after this many consecutive producer failures instead
    /// of waiting out the full budget.
    #[serde(default)]
    pub max_consecutive_transport_errors: Option<u32>,
}

const fn default_interval_ms() -> u64 {
    500
}

const fn default_budget_ms() -> u64 {
    30_000
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            budget_ms: default_budget_ms(),
            max_consecutive_transport_errors: None,
        }
    }
}

impl PollerConfig {
    /// Translate into the options the poller consumes.
    pub fn to_options(&self) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(self.interval_ms),
            budget: Duration::from_millis(self.budget_ms),
            transport_policy: match self.max_consecutive_transport_errors {
                Some(max_consecutive) => TransportPolicy::FailFast { max_consecutive },
                None => TransportPolicy::RetryUntilDeadline,
            },
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
