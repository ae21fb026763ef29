use std::fmt;

use serde::{Deserialize, Serialize};

use super::customer::CustomerId;
use super::money::{Cents, Dollars};

/// Opaque, server-issued account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload for POST /accounts on the accounts command side.
///
/// The initial balance is given in major units; the query side reports the
/// same balance back in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub customer_id: CustomerId,
    pub name: String,
    pub initial_balance: Dollars,
}

/// Response to an account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub account_id: AccountId,
}

/// An account as read back from the accounts query side, balance in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub account_id: AccountId,
    pub balance: Cents,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_wire_shape() {
        let request = CreateAccountRequest {
            customer_id: CustomerId("cust-1".to_string()),
            name: "My #1 Account".to_string(),
            initial_balance: Dollars::from(500),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerId"], "cust-1");
        assert_eq!(json["name"], "My #1 Account");
        assert_eq!(json["initialBalance"], 500.0);
    }

    #[test]
    fn account_record_parses_minor_unit_balance() {
        let record: AccountRecord =
            serde_json::from_str(r#"{"accountId": "acct-1", "balance": 35000}"#).unwrap();
        assert_eq!(record.account_id, AccountId("acct-1".to_string()));
        assert_eq!(record.balance, Cents(35_000));
    }
}
