//! Wire types for account responses (REST).

use crate::domain::account::{AccountStatus, AccountType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw balance block from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub balance: Decimal,
    pub deposit: Decimal,
    pub profit_loss: Decimal,
    pub available: Decimal,
}

/// A single account from `GET /accounts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_alias: Option<String>,
    pub account_id: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub balance: BalanceResponse,
    pub can_transfer_from: bool,
    pub can_transfer_to: bool,
    pub currency: String,
    pub preferred: bool,
    pub status: AccountStatus,
}

/// REST response for the account list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Account;
    use rust_decimal::Decimal;

    const ACCOUNTS_JSON: &str = r#"{
        "accounts": [
            {
                "accountAlias": null,
                "accountId": "ABC12",
                "accountName": "CFD",
                "accountType": "CFD",
                "balance": {
                    "available": 0.0,
                    "balance": 0.0,
                    "deposit": 0.0,
                    "profitLoss": 0.0
                },
                "canTransferFrom": true,
                "canTransferTo": true,
                "currency": "GBP",
                "preferred": false,
                "status": "ENABLED"
            },
            {
                "accountAlias": null,
                "accountId": "ABC13",
                "accountName": "Spread bet",
                "accountType": "SPREADBET",
                "balance": {
                    "available": 1250.5,
                    "balance": 1000.0,
                    "deposit": 0.0,
                    "profitLoss": 250.5
                },
                "canTransferFrom": true,
                "canTransferTo": true,
                "currency": "GBP",
                "preferred": true,
                "status": "ENABLED"
            }
        ]
    }"#;

    #[test]
    fn test_accounts_response_deserialize() {
        let resp: AccountsResponse = serde_json::from_str(ACCOUNTS_JSON).unwrap();
        assert_eq!(resp.accounts.len(), 2);
        assert_eq!(resp.accounts[0].account_type, AccountType::Cfd);
        assert_eq!(resp.accounts[1].status, AccountStatus::Enabled);
        assert!(resp.accounts[1].preferred);
    }

    #[test]
    fn test_account_conversion() {
        let resp: AccountsResponse = serde_json::from_str(ACCOUNTS_JSON).unwrap();
        let account = Account::from(resp.accounts[1].clone());
        assert_eq!(account.id, "ABC13");
        assert_eq!(account.name, "Spread bet");
        assert_eq!(account.balance.profit_loss, Decimal::new(2505, 1));
        assert_eq!(account.balance.available, Decimal::new(12505, 1));
        assert!(account.alias.is_none());
    }
}
