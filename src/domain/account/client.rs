//! Accounts sub-client.

use crate::client::IgClient;
use crate::domain::account::wire::AccountsResponse;
use crate::domain::account::Account;
use crate::error::IgError;
use crate::http::RetryPolicy;

/// Sub-client for account operations.
pub struct Accounts<'a> {
    pub(crate) client: &'a IgClient,
}

impl<'a> Accounts<'a> {
    /// List all accounts available to the authenticated user.
    pub async fn list(&self) -> Result<Vec<Account>, IgError> {
        let resp: AccountsResponse = self
            .client
            .http
            .get("/accounts", 1, RetryPolicy::Idempotent)
            .await?;
        Ok(resp.accounts.into_iter().map(Account::from).collect())
    }
}
