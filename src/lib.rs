//! Converge - Convergence Verification Harness
//!
//! Converge drives an eventually-consistent, CQRS-style banking deployment
//! from the outside: it issues writes against command-side services and then
//! repeatedly reads the query side until the observed state matches the
//! expected post-write state, bounding total wait time.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Value types for customers, accounts,
//!   transfers, money, and convergence records
//! - **Service Layer** (`services`): The convergence poller and scenario
//!   orchestration
//! - **Infrastructure Layer** (`infrastructure`): HTTP transport, endpoint
//!   resolution, configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use converge::services::{ScenarioRunner, TransferScenario};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = converge::infrastructure::config::ConfigLoader::load()?;
//!     let runner = ScenarioRunner::from_config(&config)?;
//!     runner.run_money_transfer(&TransferScenario::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AccountId, AccountRecord, Cents, CreateAccountRequest, CreateTransferRequest, CustomerId,
    CustomerInfo, CustomerRecord, Dollars, HarnessConfig, PollOptions, TransportPolicy,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::{ApiClient, ApiError, EndpointResolver, ServiceRole};
pub use services::{ConvergenceError, ConvergencePoller, ScenarioRunner, TransferScenario, Verdict};
