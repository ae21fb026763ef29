//! Scenario orchestration: sequenced command-side writes interleaved with
//! poller-guarded query-side reads.
//!
//! Writes are strictly ordered (each response is awaited before the next
//! dependent write goes out). Reads are never asserted directly; a write's
//! acknowledgement says nothing about query-side visibility, so every
//! expectation goes through the convergence poller.

use thiserror::Error;
use tracing::{info, instrument};

use super::poller::{ConvergenceError, ConvergencePoller, Verdict};
use crate::domain::models::account::{
    AccountId, AccountRecord, CreateAccountRequest, CreateAccountResponse,
};
use crate::domain::models::config::HarnessConfig;
use crate::domain::models::customer::{CustomerId, CustomerInfo, CustomerRecord, PersonName, PostalAddress};
use crate::domain::models::money::{Dollars, MoneyError};
use crate::domain::models::transfer::{CreateTransferRequest, TransferId, TransferReceipt};
use crate::infrastructure::http::{
    ApiClient, ApiError, Credentials, EndpointError, EndpointResolver, ServiceRole,
};

/// Scenario-level failures.
///
/// Write failures are fatal immediately; convergence failures surface once,
/// after the poll budget, naming the read that never converged.
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] ApiError),

    #[error("write to {role} failed: {source}")]
    Write {
        role: ServiceRole,
        #[source]
        source: ApiError,
    },

    #[error("{role} returned an empty identifier")]
    EmptyIdentifier { role: ServiceRole },

    #[error("{subject} never converged: {source}")]
    Convergence {
        subject: String,
        #[source]
        source: ConvergenceError,
    },

    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Seed values for the end-to-end money transfer workflow.
#[derive(Debug, Clone)]
pub struct TransferScenario {
    pub customer: CustomerInfo,
    pub from_initial: Dollars,
    pub to_initial: Dollars,
    pub amount: Dollars,
}

impl Default for TransferScenario {
    fn default() -> Self {
        Self {
            customer: CustomerInfo {
                name: PersonName {
                    first_name: "John".to_string(),
                    last_name: "Doe".to_string(),
                },
                email: "current@email.com".to_string(),
                ssn: "000-00-0000".to_string(),
                phone_number: "1-111-111-1111".to_string(),
                address: PostalAddress {
                    street1: "street 1".to_string(),
                    street2: "street 2".to_string(),
                    city: "City".to_string(),
                    state: "State".to_string(),
                    zip_code: "1111111".to_string(),
                },
            },
            from_initial: Dollars::from(500),
            to_initial: Dollars::from(100),
            amount: Dollars::from(150),
        }
    }
}

/// Identifiers collected while running a scenario, reported on success.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub customer_id: CustomerId,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub transfer_id: TransferId,
}

/// Drives one user-level workflow against the deployed services.
pub struct ScenarioRunner {
    client: ApiClient,
    endpoints: EndpointResolver,
    poller: ConvergencePoller,
}

impl ScenarioRunner {
    pub fn new(client: ApiClient, endpoints: EndpointResolver, poller: ConvergencePoller) -> Self {
        Self {
            client,
            endpoints,
            poller,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Result<Self, ScenarioError> {
        let endpoints = EndpointResolver::new(config.service_host.clone())?;
        let client = ApiClient::new(&config.http, Credentials::from(&config.credentials))
            .map_err(ScenarioError::Client)?;
        let poller = ConvergencePoller::new(config.poller.to_options());
        Ok(Self::new(client, endpoints, poller))
    }

    /// POST /customers on the customers command side. Creation is the one
    /// call made without the shared credential.
    pub async fn create_customer(
        &self,
        info: &CustomerInfo,
    ) -> Result<CustomerRecord, ScenarioError> {
        let role = ServiceRole::CustomersCommand;
        let url = self.endpoints.resolve(role, "/customers")?;
        let record: CustomerRecord = self
            .client
            .post_json_anonymous(url, info)
            .await
            .map_err(|source| ScenarioError::Write { role, source })?;

        if record.id.is_empty() {
            return Err(ScenarioError::EmptyIdentifier { role });
        }

        info!(customer_id = %record.id, "customer created");
        Ok(record)
    }

    /// POST /accounts on the accounts command side.
    pub async fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<AccountId, ScenarioError> {
        let role = ServiceRole::AccountsCommand;
        let url = self.endpoints.resolve(role, "/accounts")?;
        let response: CreateAccountResponse = self
            .client
            .post_json(url, request)
            .await
            .map_err(|source| ScenarioError::Write { role, source })?;

        if response.account_id.is_empty() {
            return Err(ScenarioError::EmptyIdentifier { role });
        }

        info!(account_id = %response.account_id, name = %request.name, "account created");
        Ok(response.account_id)
    }

    /// POST /transfers on the transactions command side.
    pub async fn transfer(
        &self,
        request: &CreateTransferRequest,
    ) -> Result<TransferReceipt, ScenarioError> {
        let role = ServiceRole::TransactionsCommand;
        let url = self.endpoints.resolve(role, "/transfers")?;
        let receipt: TransferReceipt = self
            .client
            .post_json(url, request)
            .await
            .map_err(|source| ScenarioError::Write { role, source })?;

        info!(transfer_id = %receipt.money_transfer_id, "transfer accepted");
        Ok(receipt)
    }

    /// Poll the customers query side until it serves the expected record.
    pub async fn await_customer(
        &self,
        id: &CustomerId,
        expected: &CustomerInfo,
    ) -> Result<CustomerRecord, ScenarioError> {
        let url = self
            .endpoints
            .resolve(ServiceRole::CustomersQuery, &format!("/customers/{id}"))?;

        self.poller
            .poll(
                || self.client.get_json::<CustomerRecord>(url.clone()),
                |record: &CustomerRecord| {
                    if record.id == *id && record.customer_info == *expected {
                        Verdict::Satisfied
                    } else {
                        Verdict::not_yet(format!("customer {id} has not propagated yet"))
                    }
                },
            )
            .await
            .map_err(|source| ScenarioError::Convergence {
                subject: format!("customer {id}"),
                source,
            })
    }

    /// Poll the accounts query side until the balance in cents equals the
    /// expected major-unit amount times one hundred.
    pub async fn await_balance(
        &self,
        id: &AccountId,
        expected: Dollars,
    ) -> Result<AccountRecord, ScenarioError> {
        let expected_cents = expected.in_cents()?;
        let url = self
            .endpoints
            .resolve(ServiceRole::AccountsQuery, &format!("/accounts/{id}"))?;

        self.poller
            .poll(
                || self.client.get_json::<AccountRecord>(url.clone()),
                |record: &AccountRecord| {
                    if record.account_id == *id && record.balance == expected_cents {
                        Verdict::Satisfied
                    } else {
                        Verdict::not_yet(format!(
                            "balance is {}, waiting for {expected_cents}",
                            record.balance
                        ))
                    }
                },
            )
            .await
            .map_err(|source| ScenarioError::Convergence {
                subject: format!("balance of account {id}"),
                source,
            })
    }

    /// The end-to-end workflow: create customer and accounts, verify initial
    /// propagation, transfer, verify final balances.
    #[instrument(skip_all)]
    pub async fn run_money_transfer(
        &self,
        scenario: &TransferScenario,
    ) -> Result<ScenarioReport, ScenarioError> {
        let from_final = scenario.from_initial.checked_sub(scenario.amount)?;
        let to_final = scenario.to_initial.checked_add(scenario.amount)?;

        let customer = self.create_customer(&scenario.customer).await?;
        self.await_customer(&customer.id, &scenario.customer)
            .await?;

        let from_account_id = self
            .create_account(&CreateAccountRequest {
                customer_id: customer.id.clone(),
                name: "My #1 Account".to_string(),
                initial_balance: scenario.from_initial,
            })
            .await?;
        let to_account_id = self
            .create_account(&CreateAccountRequest {
                customer_id: customer.id.clone(),
                name: "My #2 Account".to_string(),
                initial_balance: scenario.to_initial,
            })
            .await?;

        self.await_balance(&from_account_id, scenario.from_initial)
            .await?;
        self.await_balance(&to_account_id, scenario.to_initial)
            .await?;

        let receipt = self
            .transfer(&CreateTransferRequest {
                from_account_id: from_account_id.clone(),
                to_account_id: to_account_id.clone(),
                amount: scenario.amount,
            })
            .await?;

        self.await_balance(&from_account_id, from_final).await?;
        self.await_balance(&to_account_id, to_final).await?;

        info!(
            customer_id = %customer.id,
            from = %from_account_id,
            to = %to_account_id,
            "scenario converged"
        );

        Ok(ScenarioReport {
            customer_id: customer.id,
            from_account_id,
            to_account_id,
            transfer_id: receipt.money_transfer_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_carries_reference_seed_values() {
        let scenario = TransferScenario::default();
        assert_eq!(scenario.customer.name.first_name, "John");
        assert_eq!(scenario.customer.name.last_name, "Doe");
        assert_eq!(scenario.from_initial, Dollars::from(500));
        assert_eq!(scenario.to_initial, Dollars::from(100));
        assert_eq!(scenario.amount, Dollars::from(150));
    }

    #[test]
    fn runner_builds_from_default_config() {
        let config = HarnessConfig::default();
        assert!(ScenarioRunner::from_config(&config).is_ok());
    }
}
