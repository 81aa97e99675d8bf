//! Authentication — credentials, session tokens, login/logout.
//!
//! ## Security Model
//!
//! - Login is `POST /session` with the account identifier and password; the
//!   gateway returns the session tokens in the `CST` and `X-SECURITY-TOKEN`
//!   **response headers**, not the body.
//! - The HTTP layer stores the tokens internally (private field) and replays
//!   them as headers on every subsequent request, together with the
//!   `X-IG-API-KEY` header. Tokens are NEVER exposed via public API — no
//!   `.token()` accessor.
//! - Session lifetime comes from the `Access-Control-Max-Age` response
//!   header. When the gateway omits it, the session is treated as already
//!   stale and the next request logs in again.
//! - Logout MUST call `DELETE /session` so the gateway invalidates the
//!   tokens server-side; the client then drops its local copy.

pub mod client;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Credentials
// ============================================================================

/// User authentication details for one platform.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Session state
// ============================================================================

/// Session tokens issued by `POST /session`. Internal to the HTTP layer.
#[derive(Debug, Clone)]
pub(crate) struct SessionTokens {
    pub(crate) cst: String,
    pub(crate) security_token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Whether the session can still be replayed (tokens present, not expired).
    pub(crate) fn is_valid(&self) -> bool {
        if self.cst.is_empty() || self.security_token.is_empty() {
            return false;
        }
        Utc::now() < self.expires_at
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Login request body sent to `POST /session`.
///
/// `encryptedPassword` is always serialized as `null`: password encryption is
/// an optional scheme this client does not use, and the gateway requires the
/// field to be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
    pub encrypted_password: Option<String>,
}

/// Account funds summary embedded in the login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfoResponse {
    pub balance: Decimal,
    pub deposit: Decimal,
    pub profit_loss: Decimal,
    pub available: Decimal,
}

/// One account entry in the login response's account list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAccountResponse {
    pub account_id: String,
    pub account_name: String,
    pub preferred: bool,
    pub account_type: String,
}

/// Body of a successful `POST /session`.
///
/// The session tokens themselves arrive in response headers; this body
/// describes the account the session was opened against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub account_type: String,
    pub account_info: AccountInfoResponse,
    pub currency_iso_code: String,
    pub current_account_id: String,
    pub lightstreamer_endpoint: String,
    pub accounts: Vec<SessionAccountResponse>,
    pub client_id: String,
    pub timezone_offset: f64,
    pub has_active_demo_accounts: bool,
    pub has_active_live_accounts: bool,
    pub trailing_stops_enabled: bool,
    #[serde(default)]
    pub dealing_enabled: bool,
}

/// Response from `GET /session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub client_id: String,
    pub account_id: String,
    pub timezone_offset: f64,
    pub locale: String,
    pub currency: String,
    pub lightstreamer_endpoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tokens(expires_in_secs: i64) -> SessionTokens {
        SessionTokens {
            cst: "cst-token".into(),
            security_token: "xst-token".into(),
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    #[test]
    fn test_session_valid_before_expiry() {
        assert!(tokens(60).is_valid());
    }

    #[test]
    fn test_session_invalid_after_expiry() {
        assert!(!tokens(-1).is_valid());
    }

    #[test]
    fn test_session_invalid_with_empty_tokens() {
        let mut t = tokens(60);
        t.cst.clear();
        assert!(!t.is_valid());
    }

    #[test]
    fn test_login_request_serializes_null_encrypted_password() {
        let req = LoginRequest {
            identifier: "user".into(),
            password: "pass".into(),
            encrypted_password: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["identifier"], "user");
        assert!(json["encryptedPassword"].is_null());
    }

    #[test]
    fn test_session_details_deserialize() {
        let json = r#"{
            "clientId": "100012345",
            "accountId": "ABC12",
            "timezoneOffset": 1,
            "locale": "en_GB",
            "currency": "GBP",
            "lightstreamerEndpoint": "https://apd.marketdatasystems.com"
        }"#;
        let details: SessionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.account_id, "ABC12");
        assert_eq!(details.timezone_offset, 1.0);
        assert_eq!(details.currency, "GBP");
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let creds = ApiCredentials {
            api_key: "key".into(),
            username: "user".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("user"));
    }
}
