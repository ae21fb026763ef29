use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::domain::models::config::HarnessConfig;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging;
use crate::services::{ScenarioRunner, TransferScenario};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a config file (defaults to converge.yaml in the working
    /// directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target host, overriding configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Total convergence budget per assertion, in seconds
    #[arg(long)]
    pub budget_secs: Option<u64>,

    /// Poll interval, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    logging::init(&config.logging);

    let runner = ScenarioRunner::from_config(&config)?;
    let report = runner
        .run_money_transfer(&TransferScenario::default())
        .await?;

    println!(
        "scenario converged: customer={} from={} to={} transfer={}",
        report.customer_id, report.from_account_id, report.to_account_id, report.transfer_id
    );
    Ok(())
}

fn load_config(args: &RunArgs) -> Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    if let Some(host) = &args.host {
        config.service_host.clone_from(host);
    }
    if let Some(budget_secs) = args.budget_secs {
        config.poller.budget_ms = budget_secs * 1_000;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.poller.interval_ms = interval_ms;
    }

    // Flag overrides bypass the loader, so validate again.
    ConfigLoader::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_apply_and_validate() {
        let args = RunArgs {
            config: None,
            host: Some("bank.staging.internal".to_string()),
            budget_secs: Some(60),
            interval_ms: Some(250),
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.service_host, "bank.staging.internal");
        assert_eq!(config.poller.budget_ms, 60_000);
        assert_eq!(config.poller.interval_ms, 250);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = RunArgs {
            config: None,
            host: None,
            budget_secs: Some(0),
            interval_ms: None,
        };
        assert!(load_config(&args).is_err());
    }
}
