use std::fmt;

use serde::{Deserialize, Serialize};

use super::account::AccountId;
use super::money::Dollars;

/// Opaque, server-issued money transfer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(pub String);

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload for POST /transfers on the transactions command side, amount in
/// major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub amount: Dollars,
}

/// Acknowledgement of an accepted transfer command. Acceptance says nothing
/// about query-side visibility; balances must still be polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub money_transfer_id: TransferId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_request_wire_shape() {
        let request = CreateTransferRequest {
            from_account_id: AccountId("acct-1".to_string()),
            to_account_id: AccountId("acct-2".to_string()),
            amount: Dollars::from(150),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fromAccountId"], "acct-1");
        assert_eq!(json["toAccountId"], "acct-2");
        assert_eq!(json["amount"], 150.0);
    }

    #[test]
    fn receipt_parses_from_command_side_shape() {
        let receipt: TransferReceipt =
            serde_json::from_str(r#"{"moneyTransferId": "xfer-1"}"#).unwrap();
        assert_eq!(receipt.money_transfer_id, TransferId("xfer-1".to_string()));
    }
}
