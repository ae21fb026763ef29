pub mod account;
pub mod config;
pub mod convergence;
pub mod customer;
pub mod money;
pub mod transfer;

pub use account::{AccountId, AccountRecord, CreateAccountRequest, CreateAccountResponse};
pub use config::{CredentialsConfig, HarnessConfig, HttpConfig, LoggingConfig, PollerConfig};
pub use convergence::{
    AttemptOutcome, ConvergenceAttempt, LastObservation, PollOptions, TransportPolicy,
};
pub use customer::{CustomerId, CustomerInfo, CustomerRecord, PersonName, PostalAddress};
pub use money::{Cents, Dollars, MoneyError};
pub use transfer::{CreateTransferRequest, TransferId, TransferReceipt};
