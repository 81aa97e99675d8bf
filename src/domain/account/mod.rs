//! Account domain — trading accounts and balances.

pub mod client;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account flavour on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Cfd,
    Physical,
    Spreadbet,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cfd => "CFD",
            Self::Physical => "PHYSICAL",
            Self::Spreadbet => "SPREADBET",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Enabled,
    Disabled,
    SuspendedFromDealing,
}

/// Funds breakdown for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Total funds on the account.
    pub balance: Decimal,
    /// Funds committed as margin on open positions.
    pub deposit: Decimal,
    /// Running profit/loss across open positions.
    pub profit_loss: Decimal,
    /// Funds available to deal with.
    pub available: Decimal,
}

/// A trading account held by the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub alias: Option<String>,
    pub name: String,
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub preferred: bool,
    pub currency: String,
    pub can_transfer_from: bool,
    pub can_transfer_to: bool,
    pub balance: Balance,
}

impl From<wire::AccountResponse> for Account {
    fn from(source: wire::AccountResponse) -> Self {
        Self {
            id: source.account_id,
            alias: source.account_alias,
            name: source.account_name,
            account_type: source.account_type,
            status: source.status,
            preferred: source.preferred,
            currency: source.currency,
            can_transfer_from: source.can_transfer_from,
            can_transfer_to: source.can_transfer_to,
            balance: Balance {
                balance: source.balance.balance,
                deposit: source.balance.deposit,
                profit_loss: source.balance.profit_loss,
                available: source.balance.available,
            },
        }
    }
}
