//! High-level client — `IgClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::auth::client::Auth;
use crate::auth::ApiCredentials;
use crate::config::Config;
use crate::domain::account::client::Accounts;
use crate::domain::instrument::client::Instruments;
use crate::domain::position::client::Positions;
use crate::domain::price::client::Prices;
use crate::error::IgError;
use crate::http::IgHttp;
use crate::network::Platform;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::account::client::Accounts as AccountsClient;
pub use crate::domain::instrument::client::Instruments as InstrumentsClient;
pub use crate::domain::position::client::Positions as PositionsClient;
pub use crate::domain::price::client::Prices as PricesClient;

/// The primary entry point for the IG Index client.
///
/// Provides nested sub-client accessors for each domain:
/// `client.accounts()`, `client.positions()`, etc. Login is implicit — the
/// first request on a stale session authenticates — but can be forced via
/// `client.auth().login()`.
pub struct IgClient {
    pub(crate) http: IgHttp,
}

impl IgClient {
    pub fn builder() -> IgClientBuilder {
        IgClientBuilder::default()
    }

    /// Build a client from resolved configuration (file + environment).
    pub fn from_config(config: &Config) -> Result<Self, IgError> {
        Self::builder()
            .platform(config.platform)
            .credentials(config.credentials.clone())
            .build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn accounts(&self) -> Accounts<'_> {
        Accounts { client: self }
    }

    pub fn instruments(&self) -> Instruments<'_> {
        Instruments { client: self }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn positions(&self) -> Positions<'_> {
        Positions { client: self }
    }
}

impl Clone for IgClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct IgClientBuilder {
    platform: Platform,
    base_url: Option<String>,
    credentials: Option<ApiCredentials>,
}

impl IgClientBuilder {
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Override the gateway URL (tests, proxies). Normally derived from the
    /// platform.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Result<IgClient, IgError> {
        let credentials = self
            .credentials
            .ok_or_else(|| IgError::Validation("credentials are required".to_string()))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.platform.base_url().to_string());

        Ok(IgClient {
            http: IgHttp::new(&base_url, credentials),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ApiCredentials {
        ApiCredentials {
            api_key: "key".into(),
            username: "user".into(),
            password: "pass".into(),
        }
    }

    #[test]
    fn test_builder_derives_url_from_platform() {
        let client = IgClient::builder()
            .platform(Platform::Demo)
            .credentials(creds())
            .build()
            .unwrap();
        assert_eq!(client.http.base_url(), "https://demo-api.ig.com/gateway/deal");
    }

    #[test]
    fn test_builder_requires_credentials() {
        assert!(IgClient::builder().build().is_err());
    }

    #[test]
    fn test_builder_url_override_wins() {
        let client = IgClient::builder()
            .platform(Platform::Live)
            .base_url("http://localhost:8080/")
            .credentials(creds())
            .build()
            .unwrap();
        assert_eq!(client.http.base_url(), "http://localhost:8080");
    }
}
