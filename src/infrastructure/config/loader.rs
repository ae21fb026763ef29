use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::HarnessConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("service_host cannot be empty")]
    EmptyServiceHost,

    #[error("Invalid poll interval: {0} ms. Must be positive")]
    InvalidInterval(u64),

    #[error("Invalid poll budget: {0} ms. Must be at least the interval ({1} ms)")]
    BudgetBelowInterval(u64, u64),

    #[error("Invalid HTTP timeout: {0} s. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid fail-fast threshold: 0. Must be at least 1 when set")]
    InvalidFailFastThreshold,

    #[error("Credentials username cannot be empty")]
    EmptyUsername,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. converge.yaml in the working directory
    /// 3. Environment variables (CONVERGE_* prefix, highest priority)
    ///
    /// `CONVERGE_SERVICE_HOST` is the one variable most deployments set: it
    /// points every service role at the target host.
    pub fn load() -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file("converge.yaml"))
            .merge(Env::prefixed("CONVERGE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring env overrides.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("CONVERGE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &HarnessConfig) -> Result<(), ConfigError> {
        if config.service_host.is_empty() {
            return Err(ConfigError::EmptyServiceHost);
        }

        if config.credentials.username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.http.timeout_secs));
        }

        if config.poller.interval_ms == 0 {
            return Err(ConfigError::InvalidInterval(config.poller.interval_ms));
        }

        if config.poller.budget_ms < config.poller.interval_ms {
            return Err(ConfigError::BudgetBelowInterval(
                config.poller.budget_ms,
                config.poller.interval_ms,
            ));
        }

        if config.poller.max_consecutive_transport_errors == Some(0) {
            return Err(ConfigError::InvalidFailFastThreshold);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
